//! Handler for `POST /api/admin/import-csv`.

use axum::extract::{Multipart, State};
use axum::Json;
use beasiswa_core::csv_import::ImportReport;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::services::csv_import;
use crate::state::AppState;

/// Multipart field carrying the CSV file.
const FILE_FIELD: &str = "file";

/// POST /api/admin/import-csv
///
/// Reads the `file` part of a multipart upload and reconciles it. Row
/// failures come back inside the report with a 200.
pub async fn import_csv(
    admin: AdminUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ImportReport>> {
    let mut content = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        content = Some(data);
        break;
    }

    let content = content.ok_or_else(|| {
        AppError::BadRequest(format!("Missing multipart field '{FILE_FIELD}'"))
    })?;
    tracing::info!(admin = %admin.username, bytes = content.len(), "CSV import started");

    let report = csv_import::import_csv(state.applications.as_ref(), &content).await?;
    Ok(Json(report))
}
