//! Auth (Identity & Session) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases (register, login, logout, current user)
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, session middleware, router
//!
//! ## Features
//! - Registration with email + password and role selection
//! - Role-matching sub-profile provisioning (student/teacher) at sign-up
//! - Server-side sessions with HMAC-signed cookie tokens (30-day TTL)
//! - Role-based access via the [`Principal`] extractor
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Unknown email and wrong password are indistinguishable on login
//! - User payloads cross the API boundary only as password-free
//!   [`UserSummary`] values

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::entity::principal::Principal;
pub use domain::entity::user::UserSummary;
pub use domain::repository::ProfileProvisioner;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
