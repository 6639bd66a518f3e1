use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{Category, FieldError, Project};

/// Category selector of the gallery filter bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Architecture,
    Landscape,
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Architecture => category == Category::Architecture,
            CategoryFilter::Landscape => category == Category::Landscape,
        }
    }

    /// Parses a selector, returning `None` for unknown values. An empty
    /// selector means "all".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(CategoryFilter::All),
            "architecture" => Some(CategoryFilter::Architecture),
            "landscape" => Some(CategoryFilter::Landscape),
            _ => None,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        match category {
            Category::Architecture => CategoryFilter::Architecture,
            Category::Landscape => CategoryFilter::Landscape,
        }
    }
}

/// Catalog load status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Settled,
    Failed,
}

/// The single media source rendered for a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Media {
    Image {
        url: String,
    },
    Instagram {
        permalink: String,
    },
    #[serde(rename_all = "camelCase")]
    Linkedin {
        embed_url: String,
    },
    Placeholder,
}

impl Media {
    pub fn is_embed(&self) -> bool {
        matches!(self, Media::Instagram { .. } | Media::Linkedin { .. })
    }
}

/// Outbound links shown under a card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectLinks {
    #[ts(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[ts(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[ts(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// A rendered project card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GalleryCard {
    pub project: Project,
    pub media: Media,
    pub links: ProjectLinks,
}

/// The rendered gallery
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPage {
    pub category: CategoryFilter,
    pub query: String,
    pub status: LoadStatus,
    pub loading: bool,
    #[ts(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub cards: Vec<GalleryCard>,
    pub empty: bool,
    #[ts(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_script: Option<String>,
}

/// Response after a submission was accepted upstream
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitProjectResponse {
    pub ok: bool,
    pub page: GalleryPage,
}

/// Response listing every rejected field of a submission
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationErrorResponse {
    pub ok: bool,
    pub errors: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Landscape));
        assert!(CategoryFilter::Architecture.matches(Category::Architecture));
        assert!(!CategoryFilter::Architecture.matches(Category::Landscape));
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse(""), Some(CategoryFilter::All));
        assert_eq!(CategoryFilter::parse("Landscape"), Some(CategoryFilter::Landscape));
        assert_eq!(CategoryFilter::parse("interiors"), None);
    }

    #[test]
    fn test_media_serialization() {
        let media = Media::Linkedin {
            embed_url: "https://www.linkedin.com/embed/feed/update/urn:li:share:1".to_string(),
        };
        let json = serde_json::to_value(&media).unwrap();
        assert_eq!(json["kind"], "linkedin");
        assert!(json["embedUrl"].is_string());
        assert!(media.is_embed());
        assert!(!Media::Placeholder.is_embed());
    }
}
