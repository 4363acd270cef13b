use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use beasiswa_core::application::{NaturalKey, NewApplication, ReviewUpdate};
use beasiswa_core::types::DbId;

use super::{AdminStore, ApplicationStore, StoreError, StoreResult};
use crate::models::admin::{Admin, CreateAdmin};
use crate::models::application::Application;
use crate::repositories::{AdminRepo, ApplicationRepo};
use crate::DbPool;

/// Run a store call under `limit`, turning an elapsed timer into
/// [`StoreError::Unavailable`].
async fn bounded<T, F>(limit: Duration, op: &'static str, fut: F) -> StoreResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => {
            tracing::warn!(op, timeout_ms = limit.as_millis() as u64, "Store call timed out");
            Err(StoreError::Unavailable(format!(
                "{op} timed out after {}ms",
                limit.as_millis()
            )))
        }
    }
}

/// [`ApplicationStore`] backed by the `applications` table.
#[derive(Clone)]
pub struct PgApplicationStore {
    pool: DbPool,
    timeout: Duration,
}

impl PgApplicationStore {
    pub fn new(pool: DbPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Application>> {
        bounded(self.timeout, "find_by_id", ApplicationRepo::find_by_id(&self.pool, id)).await
    }

    async fn find_by_natural_key(&self, key: &NaturalKey) -> StoreResult<Option<Application>> {
        bounded(
            self.timeout,
            "find_by_natural_key",
            ApplicationRepo::find_by_natural_key(&self.pool, key),
        )
        .await
    }

    async fn insert(&self, input: &NewApplication) -> StoreResult<Application> {
        bounded(self.timeout, "insert", ApplicationRepo::create(&self.pool, input)).await
    }

    async fn replace_fields(
        &self,
        id: DbId,
        input: &NewApplication,
    ) -> StoreResult<Option<Application>> {
        bounded(
            self.timeout,
            "replace_fields",
            ApplicationRepo::replace_fields(&self.pool, id, input),
        )
        .await
    }

    async fn update_review(
        &self,
        id: DbId,
        input: &ReviewUpdate,
    ) -> StoreResult<Option<Application>> {
        bounded(
            self.timeout,
            "update_review",
            ApplicationRepo::update_review(&self.pool, id, input),
        )
        .await
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        bounded(self.timeout, "delete", ApplicationRepo::delete(&self.pool, id)).await
    }

    async fn page(&self, limit: i64, offset: i64) -> StoreResult<Vec<Application>> {
        bounded(
            self.timeout,
            "page",
            ApplicationRepo::list_page(&self.pool, limit, offset),
        )
        .await
    }

    async fn count(&self) -> StoreResult<i64> {
        bounded(self.timeout, "count", ApplicationRepo::count(&self.pool)).await
    }

    async fn ping(&self) -> StoreResult<()> {
        bounded(self.timeout, "ping", crate::health_check(&self.pool)).await
    }
}

/// [`AdminStore`] backed by the `admins` table.
#[derive(Clone)]
pub struct PgAdminStore {
    pool: DbPool,
    timeout: Duration,
}

impl PgAdminStore {
    pub fn new(pool: DbPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl AdminStore for PgAdminStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Admin>> {
        bounded(
            self.timeout,
            "find_admin",
            AdminRepo::find_by_username(&self.pool, username),
        )
        .await
    }

    async fn create(&self, input: &CreateAdmin) -> StoreResult<Admin> {
        bounded(self.timeout, "create_admin", AdminRepo::create(&self.pool, input)).await
    }
}
