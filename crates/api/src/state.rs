use std::sync::Arc;

use beasiswa_db::store::ApplicationStore;

use crate::auth::verifier::CredentialVerifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store for scholarship applications.
    pub applications: Arc<dyn ApplicationStore>,
    /// Login and bearer-token checks.
    pub credentials: Arc<CredentialVerifier>,
}
