use super::{load_failure, projects_from_body, submit_outcome, ProjectSource};
use async_trait::async_trait;
use reqwest::Client;
use shared_types::{CatalogError, Project, ProjectDraft};

/// Reads and writes projects through a fixed HTTP endpoint
pub struct RemoteProjectGateway {
    client: Client,
    endpoint: String,
}

impl RemoteProjectGateway {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, CatalogError> {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Result<Self, CatalogError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(CatalogError::Config(
                "Missing projects endpoint".to_string(),
            ));
        }

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProjectSource for RemoteProjectGateway {
    async fn fetch_all(&self) -> Result<Vec<Project>, CatalogError> {
        let response = self.client.get(&self.endpoint).send().await.map_err(|e| {
            CatalogError::transport(None, format!("Failed to load projects: {}", e))
        })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(load_failure(status.as_u16(), &body));
        }

        let projects = projects_from_body(&body);
        tracing::debug!("Fetched {} projects from {}", projects.len(), self.endpoint);
        Ok(projects)
    }

    async fn submit(&self, draft: &ProjectDraft) -> Result<(), CatalogError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(draft)
            .send()
            .await
            .map_err(|e| CatalogError::transport(None, format!("Submit failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        submit_outcome(status, &body)
    }
}
