pub mod remote;

pub use remote::RemoteProjectGateway;

use async_trait::async_trait;
use serde_json::Value;
use shared_types::{CatalogError, Category, Project, ProjectDraft};

/// Where the catalog reads projects from and sends submissions to
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// All projects, in display order. A readable response without a usable
    /// project list yields an empty list rather than an error.
    async fn fetch_all(&self) -> Result<Vec<Project>, CatalogError>;

    async fn submit(&self, draft: &ProjectDraft) -> Result<(), CatalogError>;
}

/// Reads the `projects` list out of a read-endpoint body. Anything that is
/// not a JSON object with a `projects` array degrades to an empty list.
pub fn projects_from_body(body: &str) -> Vec<Project> {
    let data: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Project list body is not JSON: {}", e);
            return Vec::new();
        }
    };

    match data.get("projects") {
        Some(Value::Array(items)) => items.iter().map(project_from_value).collect(),
        _ => Vec::new(),
    }
}

/// Coerces one raw element field by field
pub fn project_from_value(value: &Value) -> Project {
    let field = |name: &str| coerce_string(value.get(name));

    Project {
        id: field("id").unwrap_or_default(),
        title: field("title").unwrap_or_default(),
        description: field("description").unwrap_or_default(),
        category: Category::from_raw(value.get("category").and_then(Value::as_str).unwrap_or("")),
        image_url: field("imageUrl"),
        instagram_url: field("instagramUrl"),
        linkedin_url: field("linkedinUrl"),
        website_url: field("websiteUrl"),
        architect: field("architect"),
        location: field("location"),
    }
}

/// Strings pass through, numbers and `true` are stringified. Empty strings,
/// zero, `false`, `null` and nested values count as missing.
fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Error for a non-success read response
pub fn load_failure(status: u16, body: &str) -> CatalogError {
    let detail = if body.trim().is_empty() {
        "Check upstream deployment."
    } else {
        body.trim()
    };
    CatalogError::transport(
        Some(status),
        format!("Failed to load projects ({}). {}", status, detail),
    )
}

/// Interprets a write-endpoint response. A non-success status or an explicit
/// `ok: false` is a failure; the body's `error` is used as the message when
/// present.
pub fn submit_outcome(status: u16, body: &str) -> Result<(), CatalogError> {
    let data: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let success = (200..300).contains(&status);
    let rejected = data.get("ok") == Some(&Value::Bool(false));

    if success && !rejected {
        return Ok(());
    }

    let message = data
        .get("error")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Submit failed ({}). Check upstream logs.", status));

    Err(CatalogError::transport(Some(status), message))
}
