pub mod admin;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                  service banner (public)
/// /check-status                      status lookup (public)
///
/// /admin/login                       login (public)
/// /admin/applications                list, create (admin)
/// /admin/applications/{id}           get, update, delete (admin)
/// /admin/import-csv                  CSV import (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(public::router())
        .nest("/admin", admin::router())
}
