//! Public status check by natural key.

use beasiswa_core::application::{ApplicationStatus, NaturalKey, ReviewStage};
use beasiswa_core::error::CoreError;
use beasiswa_core::types::Timestamp;
use beasiswa_db::models::application::Application;
use beasiswa_db::store::ApplicationStore;
use serde::Serialize;

/// The subset of a record an applicant may see about their own application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    pub nim: String,
    pub nama_lengkap: String,
    pub status: ApplicationStatus,
    pub tahap: ReviewStage,
    pub catatan: Option<String>,
    pub tanggal_daftar: Timestamp,
    pub tanggal_update: Timestamp,
}

impl From<Application> for StatusView {
    fn from(app: Application) -> Self {
        Self {
            nim: app.nim,
            nama_lengkap: app.nama_lengkap,
            status: app.status,
            tahap: app.tahap,
            catatan: app.catatan,
            tanggal_daftar: app.tanggal_daftar,
            tanggal_update: app.tanggal_update,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusLookup {
    Found(StatusView),
    NotFound,
}

/// Look a record up by `(nim, email)`.
///
/// Both parts are normalized the same way stored keys are. A miss is a
/// regular outcome, not an error.
pub async fn check_status(
    store: &dyn ApplicationStore,
    nim: &str,
    email: &str,
) -> Result<StatusLookup, CoreError> {
    let key = NaturalKey::for_lookup(nim, email)?;
    let found = store.find_by_natural_key(&key).await?;
    Ok(match found {
        Some(app) => StatusLookup::Found(app.into()),
        None => StatusLookup::NotFound,
    })
}
