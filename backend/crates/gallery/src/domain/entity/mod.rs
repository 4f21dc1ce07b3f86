//! Entity Module

pub mod gallery;
pub mod image;
