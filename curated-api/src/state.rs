use crate::config::ApiConfig;
use crate::handlers::proxy::ProjectsProxy;
use curated_catalog::seed::seed_projects;
use curated_catalog::{
    CommunityFeed, EmbedRenderer, GalleryView, ProjectCatalogStore, ProjectSource,
    RemoteProjectGateway, TracingEmbedRenderer,
};
use std::sync::Arc;

/// Shared services behind every request
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ProjectsProxy>,
    /// `None` when no projects endpoint is configured
    pub gallery: Option<Arc<GalleryView>>,
    pub community: Arc<CommunityFeed>,
}

impl AppState {
    pub fn from_config(config: &ApiConfig) -> Self {
        let embeds: Arc<dyn EmbedRenderer> = Arc::new(TracingEmbedRenderer::new());
        let api_url = config.projects_api_url().map(str::to_string);

        let gallery = match api_url.as_deref().map(RemoteProjectGateway::new) {
            Some(Ok(gateway)) => {
                let source: Arc<dyn ProjectSource> = Arc::new(gateway);
                Some(Self::gallery_for(source, embeds.clone()))
            }
            Some(Err(e)) => {
                tracing::warn!("Gallery disabled: {}", e);
                None
            }
            None => {
                tracing::warn!("PROJECTS_API_URL is not configured, gallery endpoints are disabled");
                None
            }
        };

        let community = CommunityFeed::new(
            config.submissions_csv_url().map(str::to_string),
            config.submit_form_url().map(str::to_string),
            embeds,
        );

        Self {
            proxy: Arc::new(ProjectsProxy::new(api_url)),
            gallery,
            community: Arc::new(community),
        }
    }

    /// Gallery over any project source, seeded with the built-in projects
    pub fn gallery_for(source: Arc<dyn ProjectSource>, embeds: Arc<dyn EmbedRenderer>) -> Arc<GalleryView> {
        let store = Arc::new(ProjectCatalogStore::new(source, seed_projects()));
        Arc::new(GalleryView::new(store, embeds))
    }
}
