//! Infrastructure Layer
//!
//! Database gateways and the filesystem image store.

pub mod image_store;
pub mod memory;
pub mod postgres;

pub use image_store::ImageStore;
pub use memory::MemoryGalleryRepository;
pub use postgres::PgGalleryRepository;
