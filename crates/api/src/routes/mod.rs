pub mod enrollment;
pub mod health;
pub mod progress;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /enrollments/my-courses               my enrollments (GET)
/// /enrollments/verify-payment           verify signed payment (POST)
/// /enrollments/{course_id}              enroll, free courses (POST)
/// /enrollments/{course_id}/order        create payment order (POST)
/// /enrollments/{course_id}/progress     enrollment + course structure (GET)
/// /enrollments/{course_id}/check        enrollment existence (GET)
///
/// /progress/mark-complete               mark lecture complete (POST)
/// /progress/mark-incomplete             mark lecture incomplete (POST)
/// ```
///
/// All routes require a student Bearer token, enforced per-handler via the
/// `RequireStudent` extractor.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/enrollments", enrollment::router())
        .nest("/progress", progress::router())
}
