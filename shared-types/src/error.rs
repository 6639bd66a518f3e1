use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// A single rejected form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Catalog error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A required endpoint is not configured
    #[error("{0}")]
    Config(String),

    /// Non-success upstream status, explicit failure flag or network failure.
    /// `status` is `None` when no response was received.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("{}", join_messages(.0))]
    Validation(Vec<FieldError>),
}

impl CatalogError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        CatalogError::Transport {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
