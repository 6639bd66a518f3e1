use crate::embed::EmbedRenderer;
use crate::form::SubmissionForm;
use crate::media::{self, INSTAGRAM_EMBED_SCRIPT};
use crate::store::{CatalogFilter, CatalogSnapshot, ProjectCatalogStore};
use shared_types::{CatalogError, CategoryFilter, GalleryCard, GalleryPage, Media};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Gallery screen: filter bar, project cards, detail view and submission
pub struct GalleryView {
    store: Arc<ProjectCatalogStore>,
    embeds: Arc<dyn EmbedRenderer>,
    processed_embeds: Mutex<HashSet<String>>,
}

impl GalleryView {
    pub fn new(store: Arc<ProjectCatalogStore>, embeds: Arc<dyn EmbedRenderer>) -> Self {
        Self {
            store,
            embeds,
            processed_embeds: Mutex::new(HashSet::new()),
        }
    }

    pub fn store(&self) -> &Arc<ProjectCatalogStore> {
        &self.store
    }

    /// Runs the initial load. A failed load leaves the seed or previous list
    /// in place and shows up as the page's error.
    pub async fn mount(&self) -> GalleryPage {
        self.reload().await
    }

    pub async fn reload(&self) -> GalleryPage {
        if let Err(e) = self.store.load().await {
            tracing::warn!("Gallery load failed: {}", e);
        }
        self.render()
    }

    pub fn unmount(&self) {
        self.store.detach();
    }

    pub fn search(&self, query: impl Into<String>) {
        self.store.set_query(query);
    }

    pub fn select_category(&self, category: CategoryFilter) {
        self.store.set_category(category);
    }

    /// Detail view of one project, visible or not
    pub fn open(&self, id: &str) -> Option<GalleryCard> {
        let card = media::card(&self.store.find(id)?);
        self.process_new_embeds(std::slice::from_ref(&card));
        Some(card)
    }

    /// Validates the form and runs the optimistic submission. Invalid forms
    /// never reach the project source.
    pub async fn submit(&self, form: &SubmissionForm) -> Result<GalleryPage, CatalogError> {
        let draft = form.validate().map_err(CatalogError::Validation)?;
        self.store.submit(draft).await?;
        Ok(self.render())
    }

    /// The gallery under the store's current filter
    pub fn render(&self) -> GalleryPage {
        let snapshot = self.store.snapshot();
        let filter = snapshot.filter.clone();
        self.page(snapshot, &filter)
    }

    /// The gallery under `filter`, leaving the store's filter untouched
    pub fn render_filtered(&self, filter: &CatalogFilter) -> GalleryPage {
        self.page(self.store.snapshot(), filter)
    }

    fn page(&self, snapshot: CatalogSnapshot, filter: &CatalogFilter) -> GalleryPage {
        let loading = snapshot.loading();
        let cards: Vec<GalleryCard> = filter
            .apply(&snapshot.items)
            .iter()
            .map(media::card)
            .collect();

        self.process_new_embeds(&cards);

        let embed_script = cards
            .iter()
            .any(|c| matches!(c.media, Media::Instagram { .. }))
            .then(|| INSTAGRAM_EMBED_SCRIPT.to_string());

        GalleryPage {
            category: filter.category,
            query: filter.query.clone(),
            status: snapshot.status,
            loading,
            error: snapshot.last_error,
            empty: !loading && cards.is_empty(),
            cards,
            embed_script,
        }
    }

    fn process_new_embeds(&self, cards: &[GalleryCard]) {
        let mut processed = self
            .processed_embeds
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut introduced = false;
        for card in cards {
            let key = match &card.media {
                Media::Instagram { permalink } => permalink,
                Media::Linkedin { embed_url } => embed_url,
                _ => continue,
            };
            introduced |= processed.insert(key.clone());
        }
        drop(processed);

        if introduced {
            self.embeds.process();
        }
    }
}
