//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{applications, auth, import};
use crate::state::AppState;

/// Routes mounted at `/admin`. Everything except `/login` requires a bearer
/// token, enforced by the `AdminUser` extractor in each handler.
///
/// ```text
/// POST   /login                 -> login
/// GET    /applications          -> list
/// POST   /applications          -> create
/// GET    /applications/{id}     -> get_by_id
/// PUT    /applications/{id}     -> update
/// DELETE /applications/{id}     -> delete
/// POST   /import-csv            -> import_csv
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route(
            "/applications",
            get(applications::list).post(applications::create),
        )
        .route(
            "/applications/{id}",
            get(applications::get_by_id)
                .put(applications::update)
                .delete(applications::delete),
        )
        .route("/import-csv", post(import::import_csv))
}
