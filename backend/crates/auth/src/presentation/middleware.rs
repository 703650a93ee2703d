//! Session Middleware and Principal Extractor
//!
//! `resolve_session` runs once per request: if the session cookie checks
//! out it stores a [`Principal`] in the request extensions. Handlers that
//! need authentication take `Principal` as an extractor argument; when no
//! principal was resolved the extractor rejects with 401 before the
//! handler body runs.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::{Request, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::CurrentUserUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::{SessionRepository, UserRepository};

/// Middleware state
pub struct SessionLayerState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> SessionLayerState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }
}

impl<R> Clone for SessionLayerState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// Middleware that resolves the session cookie into a [`Principal`]
///
/// Requests without a valid session pass through unauthenticated; the
/// `Principal` extractor is what enforces 401 on protected routes.
pub async fn resolve_session<R>(
    State(state): State<SessionLayerState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case =
            CurrentUserUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

        if let Ok(principal) = use_case.get_principal(&token).await {
            req.extensions_mut().insert(principal);
        }
    }

    next.run(req).await
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}
