//! Admin CRUD and listing handlers for `/api/admin/applications`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use beasiswa_core::application::{
    normalize_notes, ApplicationStatus, NewApplication, ReviewStage, ReviewUpdate,
};
use beasiswa_core::error::CoreError;
use beasiswa_core::pagination::PageRequest;
use beasiswa_core::types::DbId;
use beasiswa_db::models::application::Application;
use serde::{Deserialize, Deserializer};

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::auth::AdminUser;
use crate::query::PageParams;
use crate::response::{DataResponse, PagedResponse};
use crate::services::{applications, listing};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/applications`.
///
/// `status` and `tahap` arrive as strings so an unknown value is reported as
/// a field-level validation error rather than a generic decode failure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateApplicationRequest {
    pub nim: String,
    pub email: String,
    pub nama_lengkap: String,
    pub nomor_telepon: String,
    pub alamat: String,
    pub ipk: f64,
    pub penghasilan_keluarga: i64,
    pub essay: String,
    #[serde(default)]
    pub dokumen_pendukung: String,
    #[serde(default)]
    pub rekomendasi: String,
    pub status: Option<String>,
    pub tahap: Option<String>,
    pub catatan: Option<String>,
}

impl TryFrom<CreateApplicationRequest> for NewApplication {
    type Error = CoreError;

    fn try_from(req: CreateApplicationRequest) -> Result<Self, Self::Error> {
        let status = parse_optional::<ApplicationStatus>(req.status.as_deref())?;
        let tahap = parse_optional::<ReviewStage>(req.tahap.as_deref())?;
        Ok(NewApplication {
            nim: req.nim,
            email: req.email,
            nama_lengkap: req.nama_lengkap,
            nomor_telepon: req.nomor_telepon,
            alamat: req.alamat,
            ipk: req.ipk,
            penghasilan_keluarga: req.penghasilan_keluarga,
            essay: req.essay,
            dokumen_pendukung: req.dokumen_pendukung,
            rekomendasi: req.rekomendasi,
            status: status.unwrap_or_default(),
            tahap: tahap.unwrap_or_default(),
            catatan: req.catatan,
        })
    }
}

/// Request body for `PUT /admin/applications/{id}`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateApplicationRequest {
    pub status: Option<String>,
    pub tahap: Option<String>,
    /// Absent: unchanged. `null` or blank: cleared.
    #[serde(default, deserialize_with = "present")]
    pub catatan: Option<Option<String>>,
}

impl TryFrom<UpdateApplicationRequest> for ReviewUpdate {
    type Error = CoreError;

    fn try_from(req: UpdateApplicationRequest) -> Result<Self, Self::Error> {
        Ok(ReviewUpdate {
            status: parse_optional(req.status.as_deref())?,
            tahap: parse_optional(req.tahap.as_deref())?,
            catatan: req.catatan.map(|notes| normalize_notes(notes.as_deref())),
        })
    }
}

/// Distinguishes an explicit `null` from an absent key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn parse_optional<T>(raw: Option<&str>) -> Result<Option<T>, CoreError>
where
    T: std::str::FromStr<Err = beasiswa_core::validation::FieldViolation>,
{
    raw.map(|s| s.trim().parse::<T>())
        .transpose()
        .map_err(CoreError::Validation)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/applications?page=&page_size=
pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<PagedResponse<Application>>> {
    let request = PageRequest::new(params.page, params.page_size)?;
    let page = listing::list_applications(state.applications.as_ref(), request).await?;
    Ok(Json(PagedResponse {
        data: page.records,
        pagination: page.meta,
    }))
}

/// POST /api/admin/applications
pub async fn create(
    admin: AdminUser,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateApplicationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Application>>)> {
    let input = NewApplication::try_from(input)?;
    let app = applications::create(state.applications.as_ref(), input).await?;
    tracing::debug!(admin = %admin.username, id = app.id, "Created via admin API");
    Ok((StatusCode::CREATED, Json(DataResponse { data: app })))
}

/// GET /api/admin/applications/{id}
pub async fn get_by_id(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<Application>>> {
    let app = applications::get(state.applications.as_ref(), id).await?;
    Ok(Json(DataResponse { data: app }))
}

/// PUT /api/admin/applications/{id}
///
/// Only `status`, `tahap` and `catatan` can change after creation.
pub async fn update(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateApplicationRequest>,
) -> AppResult<Json<DataResponse<Application>>> {
    let change = ReviewUpdate::try_from(input)?;
    let app = applications::update(state.applications.as_ref(), id, change).await?;
    Ok(Json(DataResponse { data: app }))
}

/// DELETE /api/admin/applications/{id}
pub async fn delete(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    applications::delete(state.applications.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
