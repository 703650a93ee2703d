//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Signed opaque tokens (HMAC-SHA256)
//! - Cookie management
//! - Client request metadata extraction

pub mod client;
pub mod cookie;
pub mod password;
pub mod token;
