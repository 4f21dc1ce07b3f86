//! Gallery Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Gallery and image entities, gateway trait, validation pipeline
//! - `application/` - Gallery service (database rows + image files)
//! - `infra/` - PostgreSQL and in-memory gateways, filesystem image store
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Galleries are rows; images are plain files under
//! `<images_dir>/galleries/<gallery id>/` and are never recorded in the
//! database.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{GalleryConfig, GalleryService};
pub use domain::{Gallery, Image};
pub use error::{GalleryError, GalleryResult};
pub use infra::{ImageStore, MemoryGalleryRepository, PgGalleryRepository};
pub use presentation::{GalleryAppState, gallery_router};
