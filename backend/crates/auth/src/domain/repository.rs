//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{session::AuthSession, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;
use uuid::Uuid;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Update user (profile fields and credentials)
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Auth session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by ID
    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>>;

    /// Delete a session (no-op if already gone)
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// Sub-profile provisioning port
///
/// Registration creates the role-matching academic profile (student or
/// teacher row) through this port. The academics store implements it; the
/// concrete instance is injected at router construction.
#[trait_variant::make(ProfileProvisioner: Send)]
pub trait LocalProfileProvisioner {
    /// Create a student profile for a freshly registered user
    async fn provision_student(&self, user_id: &UserId) -> AuthResult<()>;

    /// Create a teacher profile for a freshly registered user
    async fn provision_teacher(&self, user_id: &UserId) -> AuthResult<()>;
}
