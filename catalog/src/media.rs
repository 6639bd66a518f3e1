//! Media and link resolution for rendered projects.
//!
//! A project renders at most one media source. The first available one wins:
//! image, then Instagram embed, then LinkedIn embed, then a placeholder.

use reqwest::Url;
use shared_types::{GalleryCard, Media, Project, ProjectLinks};

pub const INSTAGRAM_EMBED_SCRIPT: &str = "https://www.instagram.com/embed.js";

const LINKEDIN_EMBED_BASE: &str = "https://www.linkedin.com/embed/feed/update/";
const LINKEDIN_URN_MARKER: &str = "urn:li:";

/// Normalized form of `url`, or `None` when it is absent or malformed
pub fn safe_url(url: Option<&str>) -> Option<String> {
    let url = url?.trim();
    if url.is_empty() {
        return None;
    }
    Url::parse(url).ok().map(|u| u.to_string())
}

/// Embed address of a LinkedIn post. URLs that already carry a `urn:li:`
/// identifier keep it, anything else is treated as a share id taken from the
/// last path segment.
pub fn linkedin_embed_url(url: &str) -> String {
    let url = url.split(['?', '#']).next().unwrap_or("").trim_end_matches('/');

    let urn = match url.find(LINKEDIN_URN_MARKER) {
        Some(start) => url[start..].split('/').next().unwrap_or("").to_string(),
        None => format!(
            "{}share:{}",
            LINKEDIN_URN_MARKER,
            url.rsplit('/').next().unwrap_or("")
        ),
    };

    format!("{}{}", LINKEDIN_EMBED_BASE, urn)
}

pub fn resolve_media(project: &Project) -> Media {
    if let Some(url) = project.image_url.as_deref().filter(|u| !u.trim().is_empty()) {
        return Media::Image {
            url: url.to_string(),
        };
    }

    if let Some(permalink) = safe_url(project.instagram_url.as_deref()) {
        return Media::Instagram { permalink };
    }

    if let Some(url) = safe_url(project.linkedin_url.as_deref()) {
        return Media::Linkedin {
            embed_url: linkedin_embed_url(&url),
        };
    }

    Media::Placeholder
}

pub fn project_links(project: &Project) -> ProjectLinks {
    ProjectLinks {
        instagram: safe_url(project.instagram_url.as_deref()),
        linkedin: safe_url(project.linkedin_url.as_deref()),
        website: safe_url(project.website_url.as_deref()),
    }
}

pub fn card(project: &Project) -> GalleryCard {
    GalleryCard {
        project: project.clone(),
        media: resolve_media(project),
        links: project_links(project),
    }
}
