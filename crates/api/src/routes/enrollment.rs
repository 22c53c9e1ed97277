//! Route definitions for the `/enrollments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::enrollment;
use crate::state::AppState;

/// Routes mounted at `/enrollments`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/my-courses", get(enrollment::my_courses))
        .route("/verify-payment", post(enrollment::verify_payment))
        .route("/{course_id}", post(enrollment::enroll))
        .route("/{course_id}/order", post(enrollment::create_order))
        .route("/{course_id}/progress", get(enrollment::get_progress))
        .route("/{course_id}/check", get(enrollment::check))
}
