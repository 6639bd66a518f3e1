pub mod community;
pub mod embed;
pub mod form;
pub mod gateway;
pub mod media;
pub mod seed;
pub mod store;
pub mod view;

pub use community::CommunityFeed;
pub use embed::{EmbedRenderer, TracingEmbedRenderer};
pub use form::{is_valid_url, MediaKind, SubmissionForm};
pub use gateway::{ProjectSource, RemoteProjectGateway};
pub use store::{CatalogFilter, CatalogSnapshot, LoadOutcome, ProjectCatalogStore};
pub use view::GalleryView;
