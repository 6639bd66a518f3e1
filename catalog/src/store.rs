//! In-memory project catalog.
//!
//! The catalog starts out holding the seed list, is replaced wholesale by
//! every successful load, and takes optimistic inserts that are either
//! confirmed by a reload or rolled back. Records are never edited in place.
//!
//! State is kept behind a synchronous lock that is never held across a
//! network call. Each load is tagged with an epoch and only the most
//! recently issued load may apply its result. Once the store is detached
//! every late result is dropped.

use crate::gateway::ProjectSource;
use chrono::Utc;
use shared_types::{CatalogError, CategoryFilter, LoadStatus, Project, ProjectDraft};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub const PROVISIONAL_ID_PREFIX: &str = "optimistic-";

/// Category and free-text filter over the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: CategoryFilter,
    pub query: String,
}

impl CatalogFilter {
    pub fn new(category: CategoryFilter, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }

    /// A project matches when its category is selected and the query is
    /// empty or a case-insensitive substring of its title, description,
    /// architect or location. Absent optional fields never match.
    pub fn matches(&self, project: &Project) -> bool {
        if !self.category.matches(project.category) {
            return false;
        }

        if self.query.is_empty() {
            return true;
        }

        let query = self.query.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&query);

        contains(&project.title)
            || contains(&project.description)
            || project.architect.as_deref().is_some_and(contains)
            || project.location.as_deref().is_some_and(contains)
    }

    pub fn apply(&self, items: &[Project]) -> Vec<Project> {
        items.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

#[derive(Debug, Clone, Default)]
struct CatalogState {
    items: Vec<Project>,
    filter: CatalogFilter,
    status: LoadStatus,
    last_error: Option<String>,
}

/// Point-in-time copy of the catalog
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub items: Vec<Project>,
    pub visible: Vec<Project>,
    pub filter: CatalogFilter,
    pub status: LoadStatus,
    pub last_error: Option<String>,
}

impl CatalogSnapshot {
    pub fn loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}

/// What a load did to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items were replaced by this many remote projects
    Replaced(usize),
    /// The source had no projects, the seed list is shown
    Seeded,
    /// A newer load was issued or the store was detached
    Discarded,
}

pub struct ProjectCatalogStore {
    source: Arc<dyn ProjectSource>,
    seed: Vec<Project>,
    state: RwLock<CatalogState>,
    load_epoch: AtomicU64,
    provisional_seq: AtomicU64,
    detached: AtomicBool,
}

impl ProjectCatalogStore {
    pub fn new(source: Arc<dyn ProjectSource>, seed: Vec<Project>) -> Self {
        let state = CatalogState {
            items: seed.clone(),
            ..Default::default()
        };

        Self {
            source,
            seed,
            state: RwLock::new(state),
            load_epoch: AtomicU64::new(0),
            provisional_seq: AtomicU64::new(0),
            detached: AtomicBool::new(false),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replaces the catalog with the source's projects, or with the seed list
    /// when the source has none. On failure the current items stay in place
    /// and the error is recorded for display.
    pub async fn load(&self) -> Result<LoadOutcome, CatalogError> {
        if self.is_detached() {
            return Ok(LoadOutcome::Discarded);
        }

        let epoch = self.load_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.write_state();
            state.status = LoadStatus::Loading;
            state.last_error = None;
        }

        let result = self.source.fetch_all().await;

        let mut state = self.write_state();
        if self.is_detached() || self.load_epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!("Discarding result of superseded catalog load {}", epoch);
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(projects) if projects.is_empty() => {
                tracing::info!("Project source is empty, showing seed projects");
                state.items = self.seed.clone();
                state.status = LoadStatus::Settled;
                Ok(LoadOutcome::Seeded)
            }
            Ok(projects) => {
                let count = projects.len();
                tracing::info!("Loaded {} projects", count);
                state.items = projects;
                state.status = LoadStatus::Settled;
                Ok(LoadOutcome::Replaced(count))
            }
            Err(e) => {
                tracing::warn!("Failed to load projects: {}", e);
                state.status = LoadStatus::Failed;
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Shows `draft` immediately, sends it upstream and reloads so the
    /// provisional entry is replaced by the canonical list. If the submit or
    /// the confirming reload fails, the provisional entry is removed again
    /// and the error is returned. A detached catalog ignores the draft.
    pub async fn submit(&self, draft: ProjectDraft) -> Result<LoadOutcome, CatalogError> {
        if self.is_detached() {
            tracing::debug!("Ignoring submit of {:?} on detached catalog", draft.title);
            return Ok(LoadOutcome::Discarded);
        }

        let provisional_id = self.next_provisional_id();
        self.write_state()
            .items
            .insert(0, Project::from_draft(provisional_id.clone(), draft.clone()));

        if let Err(e) = self.source.submit(&draft).await {
            tracing::warn!("Submit of {:?} failed: {}", draft.title, e);
            self.rollback(&provisional_id);
            return Err(with_message(e, "Submit failed"));
        }

        match self.load().await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.rollback(&provisional_id);
                Err(with_message(e, "Failed to load projects"))
            }
        }
    }

    fn rollback(&self, provisional_id: &str) {
        self.write_state().items.retain(|p| p.id != provisional_id);
    }

    fn next_provisional_id(&self) -> String {
        let seq = self.provisional_seq.fetch_add(1, Ordering::SeqCst);
        format!(
            "{}{}-{}",
            PROVISIONAL_ID_PREFIX,
            Utc::now().timestamp_millis(),
            seq
        )
    }

    pub fn set_filter(&self, category: CategoryFilter, query: impl Into<String>) {
        self.write_state().filter = CatalogFilter::new(category, query);
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.write_state().filter.query = query.into();
    }

    pub fn set_category(&self, category: CategoryFilter) {
        self.write_state().filter.category = category;
    }

    pub fn filter(&self) -> CatalogFilter {
        self.read_state().filter.clone()
    }

    pub fn items(&self) -> Vec<Project> {
        self.read_state().items.clone()
    }

    /// Items matching the current filter
    pub fn visible(&self) -> Vec<Project> {
        let state = self.read_state();
        state.filter.apply(&state.items)
    }

    pub fn find(&self, id: &str) -> Option<Project> {
        self.read_state().items.iter().find(|p| p.id == id).cloned()
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        let state = self.read_state();
        CatalogSnapshot {
            items: state.items.clone(),
            visible: state.filter.apply(&state.items),
            filter: state.filter.clone(),
            status: state.status,
            last_error: state.last_error.clone(),
        }
    }

    /// Detaches the store from its view; results of loads still in flight
    /// are dropped
    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }
}

fn with_message(err: CatalogError, fallback: &str) -> CatalogError {
    if err.to_string().trim().is_empty() {
        CatalogError::transport(err.status(), fallback)
    } else {
        err
    }
}
