//! Domain Layer
//!
//! Gallery and image entities, the gallery gateway trait and the gallery
//! validation pipeline.

pub mod entity;
pub mod repository;
pub mod validation;

// Re-exports
pub use entity::{gallery::Gallery, image::Image};
pub use repository::GalleryRepository;
pub use validation::{GalleryStep, GalleryValidator};
