//! Store abstractions consumed by the API services.
//!
//! [`ApplicationStore`] and [`AdminStore`] are object-safe so the API can hold
//! them as `Arc<dyn ...>`; Postgres backs them in production and the
//! in-memory variants back the HTTP integration tests.

mod memory;
mod postgres;

use async_trait::async_trait;
use beasiswa_core::application::{NaturalKey, NewApplication, ReviewUpdate};
use beasiswa_core::error::CoreError;
use beasiswa_core::types::DbId;

use crate::models::admin::{Admin, CreateAdmin};
use crate::models::application::Application;

pub use memory::{MemoryAdminStore, MemoryApplicationStore};
pub use postgres::{PgAdminStore, PgApplicationStore};

/// PostgreSQL `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The store could not be reached in time. Retryable by the caller.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err)
                if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) =>
            {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                StoreError::DuplicateKey(constraint)
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(constraint) => CoreError::DuplicateKey(format!(
                "record already exists (constraint {constraint})"
            )),
            StoreError::Unavailable(msg) => CoreError::StoreUnavailable(msg),
            StoreError::Database(e) => CoreError::Internal(format!("database error: {e}")),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent collection of scholarship applications.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Application>>;

    async fn find_by_natural_key(&self, key: &NaturalKey) -> StoreResult<Option<Application>>;

    /// Create a record. Fails with [`StoreError::DuplicateKey`] when the
    /// natural key is taken, even if a caller's pre-check raced.
    async fn insert(&self, input: &NewApplication) -> StoreResult<Application>;

    /// Overwrite every non-key field. `None` when the id does not exist.
    async fn replace_fields(
        &self,
        id: DbId,
        input: &NewApplication,
    ) -> StoreResult<Option<Application>>;

    /// Change status/stage/notes. `None` when the id does not exist.
    async fn update_review(
        &self,
        id: DbId,
        input: &ReviewUpdate,
    ) -> StoreResult<Option<Application>>;

    /// `true` if a record was removed.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;

    /// Records ordered by registration time descending, then id ascending.
    async fn page(&self, limit: i64, offset: i64) -> StoreResult<Vec<Application>>;

    async fn count(&self) -> StoreResult<i64>;

    /// Reachability check for the health endpoint.
    async fn ping(&self) -> StoreResult<()>;
}

/// Administrator credentials, consulted only by the credential verifier.
#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Admin>>;

    async fn create(&self, input: &CreateAdmin) -> StoreResult<Admin>;
}
