//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the validation
//! pipeline.

pub mod entity;
pub mod repository;
pub mod validation;
pub mod value_object;

// Re-exports
pub use entity::user::User;
pub use repository::UserRepository;
pub use validation::{UserStep, UserValidator};
