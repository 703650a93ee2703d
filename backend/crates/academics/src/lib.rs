//! Academics Backend Module
//!
//! Domain store and role-gated CRUD API for the school administration
//! entities: departments, academic periods, students, teachers, subjects,
//! courses, enrollments, grades, attendance, schedules and assignments.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, joined read models, repository traits
//! - `application/` - Use cases (dashboard statistics, active period)
//! - `infra/` - PostgreSQL store
//! - `presentation/` - HTTP handlers, authorization policy table, router
//!
//! ## Authorization Model
//! - Every route requires an authenticated [`auth::Principal`]
//! - Mutations are gated by a declarative (resource, action) -> roles
//!   policy table; handlers never hand-roll role checks
//!
//! ## Integrity Model
//! - Foreign keys are verified before insert/update (409 on a missing
//!   referent)
//! - Deletes are rejected while dependent rows exist (409), never
//!   cascaded or orphaned
//! - At most one academic period is active; switching is atomic

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{AcademicsError, AcademicsResult};
pub use infra::postgres::PgAcademicsStore;
pub use presentation::router::academics_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::joined::*;
    pub use crate::domain::status::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAcademicsStore as AcademicsStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod policy {
    pub use crate::presentation::policy::*;
}

#[cfg(test)]
mod tests;
