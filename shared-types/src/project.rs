use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Project category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Architecture,
    Landscape,
}

impl Category {
    /// Snaps a raw value to a category: only an exact `landscape` selects
    /// the landscape category, everything else is architecture.
    pub fn from_raw(value: &str) -> Self {
        if value == "landscape" {
            Category::Landscape
        } else {
            Category::Architecture
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Architecture => "architecture",
            Category::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A showcased architecture or landscape project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub instagram_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub architect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub location: Option<String>,
}

impl Project {
    /// Promotes a draft to a project carrying the given id
    pub fn from_draft(id: impl Into<String>, draft: ProjectDraft) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            image_url: draft.image_url,
            instagram_url: draft.instagram_url,
            linkedin_url: draft.linkedin_url,
            website_url: draft.website_url,
            architect: draft.architect,
            location: draft.location,
        }
    }

    /// The project's fields without its id
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            image_url: self.image_url.clone(),
            instagram_url: self.instagram_url.clone(),
            linkedin_url: self.linkedin_url.clone(),
            website_url: self.website_url.clone(),
            architect: self.architect.clone(),
            location: self.location.clone(),
        }
    }
}

/// A project that has not been assigned an id yet. This is the body of a
/// submission to the upstream API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub instagram_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub architect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub location: Option<String>,
}

/// Response containing a list of projects
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

/// Response of the upstream write endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub ok: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_raw() {
        assert_eq!(Category::from_raw("landscape"), Category::Landscape);
        assert_eq!(Category::from_raw("architecture"), Category::Architecture);
        assert_eq!(Category::from_raw("Landscape"), Category::Architecture);
        assert_eq!(Category::from_raw(""), Category::Architecture);
    }

    #[test]
    fn test_project_serializes_camel_case_without_absent_fields() {
        let project = Project::from_draft(
            "7",
            ProjectDraft {
                title: "Urban Garden".to_string(),
                description: "Rooftop planting".to_string(),
                category: Category::Landscape,
                image_url: Some("https://example.com/garden.jpg".to_string()),
                ..Default::default()
            },
        );

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["category"], "landscape");
        assert_eq!(json["imageUrl"], "https://example.com/garden.jpg");
        assert!(json.get("instagramUrl").is_none());
        assert!(json.get("architect").is_none());
    }

    #[test]
    fn test_draft_round_trip_keeps_fields() {
        let draft = ProjectDraft {
            title: "Modern Villa".to_string(),
            description: "Open plan".to_string(),
            architect: Some("Studio Architects".to_string()),
            ..Default::default()
        };
        let project = Project::from_draft("1", draft.clone());
        assert_eq!(project.to_draft(), draft);
    }
}
