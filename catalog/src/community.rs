use crate::embed::EmbedRenderer;
use extractors::CommunityExtractor;
use reqwest::Client;
use shared_types::{CatalogError, CommunityPost, CommunityResponse};
use std::sync::Arc;

/// Community links pulled from the public submission sheet export
pub struct CommunityFeed {
    client: Client,
    csv_url: Option<String>,
    form_url: Option<String>,
    extractor: CommunityExtractor,
    embeds: Arc<dyn EmbedRenderer>,
}

impl CommunityFeed {
    pub fn new(
        csv_url: Option<String>,
        form_url: Option<String>,
        embeds: Arc<dyn EmbedRenderer>,
    ) -> Self {
        Self {
            client: Client::new(),
            csv_url: csv_url.filter(|u| !u.trim().is_empty()),
            form_url: form_url.filter(|u| !u.trim().is_empty()),
            extractor: CommunityExtractor::new(),
            embeds,
        }
    }

    pub fn form_url(&self) -> Option<&str> {
        self.form_url.as_deref()
    }

    pub async fn fetch(&self) -> Result<CommunityResponse, CatalogError> {
        let csv_url = self
            .csv_url
            .as_deref()
            .ok_or_else(|| CatalogError::Config("Missing CSV URL".to_string()))?;

        let response = self.client.get(csv_url).send().await.map_err(|e| {
            CatalogError::transport(None, format!("Failed to fetch community sheet: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::transport(
                Some(status.as_u16()),
                format!("Failed to fetch community sheet ({})", status.as_u16()),
            ));
        }

        let text = response.text().await.map_err(|e| {
            CatalogError::transport(
                Some(status.as_u16()),
                format!("Failed to read community sheet: {}", e),
            )
        })?;

        Ok(self.publish(&text))
    }

    /// Approved posts of an already downloaded sheet
    pub fn publish(&self, csv: &str) -> CommunityResponse {
        let posts: Vec<CommunityPost> = self.extractor.extract_published(csv);
        tracing::debug!("Community sheet has {} published posts", posts.len());

        if !posts.is_empty() {
            self.embeds.process();
        }

        CommunityResponse {
            form_url: self.form_url.clone(),
            posts,
        }
    }
}
