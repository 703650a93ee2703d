//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{ProfileProvisioner, SessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
///
/// The profile provisioner is the academics store; it creates the
/// student/teacher sub-profile during registration.
pub fn auth_router<P>(repo: PgAuthRepository, provisioner: P, config: AuthConfig) -> Router
where
    P: ProfileProvisioner + Send + Sync + 'static,
{
    auth_router_generic(repo, provisioner, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R, P>(repo: R, provisioner: P, config: AuthConfig) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    P: ProfileProvisioner + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        provisioner: Arc::new(provisioner),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R, P>))
        .route("/login", post(handlers::login::<R, P>))
        .route("/logout", post(handlers::logout::<R, P>))
        .route("/me", get(handlers::me::<R, P>))
        .with_state(state)
}
