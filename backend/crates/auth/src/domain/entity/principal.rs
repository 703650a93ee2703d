//! Principal
//!
//! The authenticated identity attached to a request once its session has
//! been resolved. Handlers receive it through the axum extractor in
//! `presentation::middleware`; a request without a valid session never
//! produces one.

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// Authenticated request identity
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Principal {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }
}
