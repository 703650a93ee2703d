//! Academics Router

use axum::{
    Router,
    routing::{get, patch},
};
use std::sync::Arc;

use crate::domain::repository::AcademicsRepository;
use crate::infra::postgres::PgAcademicsStore;
use crate::presentation::handlers::{self, AcademicsAppState};

/// Create the academics router with the PostgreSQL store
///
/// The session middleware (auth crate) must be layered on top so the
/// `Principal` extractor finds an identity to gate on.
pub fn academics_router(store: PgAcademicsStore) -> Router {
    academics_router_generic(store)
}

/// Create a generic academics router for any store implementation
pub fn academics_router_generic<R>(store: R) -> Router
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    let state = AcademicsAppState {
        store: Arc::new(store),
    };

    Router::new()
        .route(
            "/students",
            get(handlers::list_students::<R>).post(handlers::create_student::<R>),
        )
        .route(
            "/students/{id}",
            patch(handlers::update_student::<R>).delete(handlers::delete_student::<R>),
        )
        .route(
            "/teachers",
            get(handlers::list_teachers::<R>).post(handlers::create_teacher::<R>),
        )
        .route(
            "/teachers/{id}",
            patch(handlers::update_teacher::<R>).delete(handlers::delete_teacher::<R>),
        )
        .route(
            "/departments",
            get(handlers::list_departments::<R>).post(handlers::create_department::<R>),
        )
        .route(
            "/subjects",
            get(handlers::list_subjects::<R>).post(handlers::create_subject::<R>),
        )
        .route(
            "/courses",
            get(handlers::list_courses::<R>).post(handlers::create_course::<R>),
        )
        .route(
            "/courses/{id}",
            patch(handlers::update_course::<R>).delete(handlers::delete_course::<R>),
        )
        .route(
            "/grades",
            get(handlers::list_grades::<R>).post(handlers::create_grade::<R>),
        )
        .route(
            "/grades/{id}",
            patch(handlers::update_grade::<R>).delete(handlers::delete_grade::<R>),
        )
        .route("/dashboard/statistics", get(handlers::statistics::<R>))
        .with_state(state)
}
