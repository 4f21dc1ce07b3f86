//! Application Layer

pub mod config;
pub mod gallery_service;

// Re-exports
pub use config::GalleryConfig;
pub use gallery_service::GalleryService;
