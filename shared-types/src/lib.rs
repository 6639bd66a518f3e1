use serde::{Deserialize, Serialize};

pub mod community;
pub mod error;
pub mod gallery;
pub mod project;

pub use community::{CommunityPost, CommunityResponse};
pub use error::{CatalogError, FieldError};
pub use gallery::{
    CategoryFilter, GalleryCard, GalleryPage, LoadStatus, Media, ProjectLinks,
    SubmitProjectResponse, ValidationErrorResponse,
};
pub use project::{Category, Project, ProjectDraft, ProjectsResponse, SubmitResponse};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error body returned by the upstream proxy. `ok` is always false.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyErrorResponse {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProxyErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
