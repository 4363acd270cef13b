//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use beasiswa_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Administrator authenticated by the `Authorization: Bearer <token>` header.
///
/// Adding this extractor to a handler makes the route admin-only; a missing,
/// malformed or expired token is rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// Username from `claims.sub`.
    pub username: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = state.credentials.verify(token)?;

        Ok(AdminUser {
            username: claims.sub,
        })
    }
}
