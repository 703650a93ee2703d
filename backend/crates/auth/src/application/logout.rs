//! Logout Use Case
//!
//! Invalidates the current session. Idempotent: an absent, expired, or
//! tampered token still results in a successful logout.

use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Destroy the session referenced by the token, if it checks out
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<()> {
        let Some(token) = session_token else {
            return Ok(());
        };

        let Some(payload) = platform::token::verify(&self.config.session_secret, token) else {
            return Ok(());
        };

        let Ok(session_id) = payload.parse::<Uuid>() else {
            return Ok(());
        };

        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "User logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::session::AuthSession;

    /// Repository with no sessions; delete is a no-op as in Postgres
    #[derive(Clone)]
    struct NoSessions;

    impl SessionRepository for NoSessions {
        async fn create(&self, _session: &AuthSession) -> AuthResult<()> {
            unreachable!("logout never creates sessions")
        }

        async fn find_by_id(&self, _id: Uuid) -> AuthResult<Option<AuthSession>> {
            Ok(None)
        }

        async fn delete(&self, _id: Uuid) -> AuthResult<()> {
            Ok(())
        }

        async fn cleanup_expired(&self) -> AuthResult<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let config = Arc::new(AuthConfig::development());
        let use_case = LogoutUseCase::new(Arc::new(NoSessions), config.clone());

        // No cookie at all
        assert!(use_case.execute(None).await.is_ok());

        // Tampered/garbage token
        assert!(use_case.execute(Some("garbage-token")).await.is_ok());

        // Well-formed token for a session that no longer exists, twice
        let token =
            platform::token::sign(&config.session_secret, &Uuid::new_v4().to_string());
        assert!(use_case.execute(Some(&token)).await.is_ok());
        assert!(use_case.execute(Some(&token)).await.is_ok());
    }
}
