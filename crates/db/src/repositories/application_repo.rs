//! Repository for the `applications` table.

use beasiswa_core::application::{NaturalKey, NewApplication, ReviewUpdate};
use beasiswa_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::Application;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nim, email, nama_lengkap, nomor_telepon, alamat, ipk, \
                       penghasilan_keluarga, essay, dokumen_pendukung, rekomendasi, \
                       status, tahap, catatan, tanggal_daftar, tanggal_update";

/// Provides CRUD operations for scholarship applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application, returning the created row.
    ///
    /// Both timestamps come from the same `NOW()` so they are equal at creation.
    /// A natural-key collision surfaces as a `23505` on `uq_applications_nim_email`.
    pub async fn create(pool: &PgPool, input: &NewApplication) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications
                (nim, email, nama_lengkap, nomor_telepon, alamat, ipk, penghasilan_keluarga,
                 essay, dokumen_pendukung, rekomendasi, status, tahap, catatan)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(&input.nim)
            .bind(&input.email)
            .bind(&input.nama_lengkap)
            .bind(&input.nomor_telepon)
            .bind(&input.alamat)
            .bind(input.ipk)
            .bind(input.penghasilan_keluarga)
            .bind(&input.essay)
            .bind(&input.dokumen_pendukung)
            .bind(&input.rekomendasi)
            .bind(input.status.as_str())
            .bind(input.tahap.as_str())
            .bind(&input.catatan)
            .fetch_one(pool)
            .await
    }

    /// Find an application by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an application by its `(nim, email)` natural key (exact match on
    /// the normalized values).
    pub async fn find_by_natural_key(
        pool: &PgPool,
        key: &NaturalKey,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE nim = $1 AND email = $2");
        sqlx::query_as::<_, Application>(&query)
            .bind(key.nim())
            .bind(key.email())
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every non-key field from `input` and refresh `tanggal_update`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace_fields(
        pool: &PgPool,
        id: DbId,
        input: &NewApplication,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET
                nama_lengkap = $2,
                nomor_telepon = $3,
                alamat = $4,
                ipk = $5,
                penghasilan_keluarga = $6,
                essay = $7,
                dokumen_pendukung = $8,
                rekomendasi = $9,
                status = $10,
                tahap = $11,
                catatan = $12,
                tanggal_update = GREATEST(NOW(), tanggal_daftar)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(&input.nama_lengkap)
            .bind(&input.nomor_telepon)
            .bind(&input.alamat)
            .bind(input.ipk)
            .bind(input.penghasilan_keluarga)
            .bind(&input.essay)
            .bind(&input.dokumen_pendukung)
            .bind(&input.rekomendasi)
            .bind(input.status.as_str())
            .bind(input.tahap.as_str())
            .bind(&input.catatan)
            .fetch_optional(pool)
            .await
    }

    /// Apply a review update. Only `Some` fields are changed; the notes are
    /// cleared when `catatan` is `Some(None)`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_review(
        pool: &PgPool,
        id: DbId,
        input: &ReviewUpdate,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET
                status = COALESCE($2, status),
                tahap = COALESCE($3, tahap),
                catatan = CASE WHEN $4 THEN $5 ELSE catatan END,
                tanggal_update = GREATEST(NOW(), tanggal_daftar)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.tahap.map(|t| t.as_str()))
            .bind(input.catatan.is_some())
            .bind(input.catatan.clone().flatten())
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an application. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One window of applications, most recently registered first; ties are
    /// broken by id so paging is deterministic.
    pub async fn list_page(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications
             ORDER BY tanggal_daftar DESC, id ASC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of applications.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM applications")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
