//! Public handlers: service banner and status check.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::services::status_lookup::{self, StatusLookup, StatusView};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: &'static str,
}

/// GET /api/
pub async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Scholarship Status Checker API",
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckStatusRequest {
    pub nim: String,
    pub email: String,
}

/// `{found: false}` on a miss, otherwise `found: true` plus the status view.
#[derive(Debug, Serialize)]
pub struct CheckStatusResponse {
    pub found: bool,
    #[serde(flatten)]
    pub application: Option<StatusView>,
}

/// POST /api/check-status
///
/// A miss is a 200 with `found: false`, never an error status.
pub async fn check_status(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CheckStatusRequest>,
) -> AppResult<Json<CheckStatusResponse>> {
    let outcome =
        status_lookup::check_status(state.applications.as_ref(), &input.nim, &input.email).await?;

    let response = match outcome {
        StatusLookup::Found(view) => CheckStatusResponse {
            found: true,
            application: Some(view),
        },
        StatusLookup::NotFound => CheckStatusResponse {
            found: false,
            application: None,
        },
    };
    Ok(Json(response))
}
