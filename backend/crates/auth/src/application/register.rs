//! Register Use Case
//!
//! Creates a new user account, provisions the role-matching sub-profile,
//! and establishes a session (auto-login).

use std::net::IpAddr;
use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::{session::AuthSession, user::User};
use crate::domain::repository::{ProfileProvisioner, SessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
    pub avatar: Option<String>,
    pub client_ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub user: User,
    /// Signed session token for the auto-login cookie
    pub session_token: String,
}

/// Register use case
pub struct RegisterUseCase<U, S, P>
where
    U: UserRepository,
    S: SessionRepository,
    P: ProfileProvisioner,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    provisioner: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<U, S, P> RegisterUseCase<U, S, P>
where
    U: UserRepository,
    S: SessionRepository,
    P: ProfileProvisioner,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        provisioner: Arc<P>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            provisioner,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        if input.name.trim().is_empty() {
            return Err(AuthError::Validation("Name cannot be empty".to_string()));
        }

        // The role is decided exactly once, here; everything downstream
        // branches on the enum, never on the raw string.
        let role = UserRole::from_code(&input.role)
            .ok_or_else(|| AuthError::InvalidRole(input.role.clone()))?;

        let email =
            Email::new(input.email).map_err(|e| AuthError::Validation(e.message().to_string()))?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        // Validate and hash password
        let password = ClearTextPassword::new(input.password)?;
        let password_hash = password.hash()?;

        let user = User::new(email, password_hash, input.name, role, input.avatar);
        self.user_repo.create(&user).await?;

        // Role-matching sub-profile
        match role {
            UserRole::Student => self.provisioner.provision_student(&user.user_id).await?,
            UserRole::Teacher => self.provisioner.provision_teacher(&user.user_id).await?,
            UserRole::Admin => {}
        }

        // Auto-login
        let session = AuthSession::new(
            user.user_id,
            user.role,
            self.config.session_ttl,
            input.client_ip,
            input.user_agent,
        );
        self.session_repo.create(&session).await?;

        let session_token = platform::token::sign(
            &self.config.session_secret,
            &session.session_id.to_string(),
        );

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            "User registered"
        );

        Ok(RegisterOutput {
            user,
            session_token,
        })
    }
}
