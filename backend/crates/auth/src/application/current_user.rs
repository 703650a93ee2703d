//! Current User Use Case
//!
//! Verifies the session token and exposes the current principal (and its
//! full user row for `/auth/me`). Expired sessions are deleted on access.

use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::{principal::Principal, session::AuthSession, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Current user use case
pub struct CurrentUserUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> CurrentUserUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Resolve the session behind a token
    pub async fn get_session(&self, session_token: &str) -> AuthResult<AuthSession> {
        let session_id = self.parse_session_token(session_token)?;

        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        Ok(session)
    }

    /// Resolve the request principal behind a token
    pub async fn get_principal(&self, session_token: &str) -> AuthResult<Principal> {
        let session = self.get_session(session_token).await?;
        Ok(Principal::new(session.user_id, session.user_role))
    }

    /// Resolve the full user behind a token
    ///
    /// A session whose user row has since been deleted counts as invalid.
    pub async fn get_user(&self, session_token: &str) -> AuthResult<User> {
        let session = self.get_session(session_token).await?;

        self.user_repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AuthError::SessionInvalid)
    }

    /// Parse and verify session token
    fn parse_session_token(&self, token: &str) -> AuthResult<Uuid> {
        let payload = platform::token::verify(&self.config.session_secret, token)
            .ok_or(AuthError::SessionInvalid)?;

        payload.parse().map_err(|_| AuthError::SessionInvalid)
    }
}
