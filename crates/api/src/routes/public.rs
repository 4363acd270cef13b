//! Unauthenticated routes under `/api`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::status;
use crate::state::AppState;

/// ```text
/// GET  /              -> banner
/// POST /check-status  -> check_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(status::banner))
        .route("/check-status", post(status::check_status))
}
