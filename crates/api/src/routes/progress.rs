//! Route definitions for the `/progress` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Routes mounted at `/progress`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mark-complete", post(progress::mark_complete))
        .route("/mark-incomplete", post(progress::mark_incomplete))
}
