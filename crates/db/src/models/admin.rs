//! Administrator credential model.

use beasiswa_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Row from the `admins` table.
///
/// Holds the Argon2id PHC hash -- never serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// DTO for seeding an administrator.
#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub username: String,
    pub password_hash: String,
}
