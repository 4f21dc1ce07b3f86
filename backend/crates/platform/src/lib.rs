//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Secure random tokens and HMAC-SHA256 signing
//! - Password hashing (Argon2id with an application pepper)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
