//! Scholarship application entity model.

use beasiswa_core::application::{ApplicationStatus, NaturalKey, ReviewStage};
use beasiswa_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `applications` table.
///
/// Inserts take a [`beasiswa_core::application::NewApplication`]; review
/// changes take a [`beasiswa_core::application::ReviewUpdate`].
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub nim: String,
    pub email: String,
    pub nama_lengkap: String,
    pub nomor_telepon: String,
    pub alamat: String,
    pub ipk: f64,
    pub penghasilan_keluarga: i64,
    pub essay: String,
    pub dokumen_pendukung: String,
    pub rekomendasi: String,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    #[sqlx(try_from = "String")]
    pub tahap: ReviewStage,
    pub catatan: Option<String>,
    pub tanggal_daftar: Timestamp,
    pub tanggal_update: Timestamp,
}

impl Application {
    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::new(&self.nim, &self.email)
    }
}
