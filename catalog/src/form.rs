use reqwest::Url;
use serde::{Deserialize, Serialize};
use shared_types::{Category, FieldError, ProjectDraft};

/// Media field a form can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Instagram,
    Linkedin,
}

impl MediaKind {
    fn field(&self) -> &'static str {
        match self {
            MediaKind::Image => "imageUrl",
            MediaKind::Instagram => "instagramUrl",
            MediaKind::Linkedin => "linkedinUrl",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "Image URL",
            MediaKind::Instagram => "Instagram URL",
            MediaKind::Linkedin => "LinkedIn URL",
        }
    }
}

/// User-entered project data, validated before it is handed to the catalog.
///
/// With `required_media` unset every media field is optional; when set, the
/// selected media field must be filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionForm {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub image_url: String,
    pub instagram_url: String,
    pub linkedin_url: String,
    pub website_url: String,
    pub architect: String,
    pub location: String,
    pub required_media: Option<MediaKind>,
}

/// Whether `url` parses as an absolute URL
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

impl SubmissionForm {
    fn media_value(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Image => &self.image_url,
            MediaKind::Instagram => &self.instagram_url,
            MediaKind::Linkedin => &self.linkedin_url,
        }
    }

    /// Every problem with the form, in field order
    pub fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title is required."));
        }
        if self.description.trim().is_empty() {
            errors.push(FieldError::new("description", "Description is required."));
        }

        if let Some(kind) = self.required_media {
            if self.media_value(kind).trim().is_empty() {
                errors.push(FieldError::new(
                    kind.field(),
                    format!("{} is required.", kind.label()),
                ));
            }
        }

        let urls = [
            ("imageUrl", "Image URL", &self.image_url),
            ("instagramUrl", "Instagram URL", &self.instagram_url),
            ("linkedinUrl", "LinkedIn URL", &self.linkedin_url),
            ("websiteUrl", "Website URL", &self.website_url),
        ];
        for (field, label, value) in urls {
            let value = value.trim();
            if !value.is_empty() && !is_valid_url(value) {
                errors.push(FieldError::new(
                    field,
                    format!("{} must be a valid URL.", label),
                ));
            }
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// The trimmed draft, or every field error when the form is not valid.
    /// Empty optional fields become absent.
    pub fn validate(&self) -> Result<ProjectDraft, Vec<FieldError>> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }

        let optional = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        Ok(ProjectDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category,
            image_url: optional(&self.image_url),
            instagram_url: optional(&self.instagram_url),
            linkedin_url: optional(&self.linkedin_url),
            website_url: optional(&self.website_url),
            architect: optional(&self.architect),
            location: optional(&self.location),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SubmissionForm {
        SubmissionForm {
            title: "  Harbour Steps ".to_string(),
            description: "Terraced public space".to_string(),
            category: Category::Landscape,
            ..Default::default()
        }
    }

    #[test]
    fn test_is_valid_url() {
        assert!(!is_valid_url("not a url"));
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("https://www.instagram.com/p/abc/"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_required_fields() {
        let errors = SubmissionForm::default().errors();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "description"]);

        let blank = SubmissionForm {
            title: "   ".to_string(),
            description: "\n".to_string(),
            ..Default::default()
        };
        assert_eq!(blank.errors().len(), 2);
    }

    #[test]
    fn test_errors_accumulate() {
        let form = SubmissionForm {
            title: String::new(),
            image_url: "villa.jpg".to_string(),
            website_url: "not a url".to_string(),
            ..filled()
        };

        let messages: Vec<_> = form.errors().into_iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            vec![
                "Title is required.",
                "Image URL must be a valid URL.",
                "Website URL must be a valid URL.",
            ]
        );
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_empty_optional_url_is_absent_not_invalid() {
        let form = SubmissionForm {
            instagram_url: "   ".to_string(),
            ..filled()
        };
        let draft = form.validate().unwrap();
        assert_eq!(draft.title, "Harbour Steps");
        assert_eq!(draft.instagram_url, None);
        assert_eq!(draft.architect, None);
        assert_eq!(draft.category, Category::Landscape);
    }

    #[test]
    fn test_required_media_source() {
        let form = SubmissionForm {
            required_media: Some(MediaKind::Instagram),
            image_url: "https://example.com/a.jpg".to_string(),
            ..filled()
        };
        let errors = form.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "instagramUrl");
        assert_eq!(errors[0].message, "Instagram URL is required.");

        let form = SubmissionForm {
            instagram_url: "https://www.instagram.com/p/abc/".to_string(),
            ..form
        };
        assert!(form.is_valid());
    }

    #[test]
    fn test_deserializes_partial_json() {
        let form: SubmissionForm = serde_json::from_str(
            r#"{"title": "Villa", "description": "Open plan", "requiredMedia": "linkedin"}"#,
        )
        .unwrap();
        assert_eq!(form.required_media, Some(MediaKind::Linkedin));
        assert_eq!(form.category, Category::Architecture);
        assert_eq!(form.errors()[0].message, "LinkedIn URL is required.");
    }
}
