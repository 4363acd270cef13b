//! In-memory store that fails on demand, for exercising service error paths.

use async_trait::async_trait;
use beasiswa_core::application::{NaturalKey, NewApplication, ReviewUpdate};
use beasiswa_core::types::DbId;
use beasiswa_db::models::application::Application;
use beasiswa_db::store::{ApplicationStore, MemoryApplicationStore, StoreError, StoreResult};

pub(crate) enum Fault {
    /// Every call fails as if the store timed out.
    Unavailable,
    /// Lookups for this nim miss and its insert hits the uniqueness
    /// constraint, as when another writer commits the key in between.
    RacedInsert { nim: String },
}

pub(crate) struct FaultyStore {
    pub inner: MemoryApplicationStore,
    fault: Fault,
}

impl FaultyStore {
    pub fn new(fault: Fault) -> Self {
        Self {
            inner: MemoryApplicationStore::new(),
            fault,
        }
    }

    fn reachable(&self) -> StoreResult<()> {
        match self.fault {
            Fault::Unavailable => Err(StoreError::Unavailable("timed out after 10ms".into())),
            Fault::RacedInsert { .. } => Ok(()),
        }
    }

    fn raced(&self, nim: &str) -> bool {
        matches!(&self.fault, Fault::RacedInsert { nim: raced } if raced == nim)
    }
}

#[async_trait]
impl ApplicationStore for FaultyStore {
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Application>> {
        self.reachable()?;
        self.inner.find_by_id(id).await
    }

    async fn find_by_natural_key(&self, key: &NaturalKey) -> StoreResult<Option<Application>> {
        self.reachable()?;
        if self.raced(key.nim()) {
            return Ok(None);
        }
        self.inner.find_by_natural_key(key).await
    }

    async fn insert(&self, input: &NewApplication) -> StoreResult<Application> {
        self.reachable()?;
        if self.raced(&input.nim) {
            return Err(StoreError::DuplicateKey("applications_nim_email_key".into()));
        }
        self.inner.insert(input).await
    }

    async fn replace_fields(
        &self,
        id: DbId,
        input: &NewApplication,
    ) -> StoreResult<Option<Application>> {
        self.reachable()?;
        self.inner.replace_fields(id, input).await
    }

    async fn update_review(
        &self,
        id: DbId,
        input: &ReviewUpdate,
    ) -> StoreResult<Option<Application>> {
        self.reachable()?;
        self.inner.update_review(id, input).await
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        self.reachable()?;
        self.inner.delete(id).await
    }

    async fn page(&self, limit: i64, offset: i64) -> StoreResult<Vec<Application>> {
        self.reachable()?;
        self.inner.page(limit, offset).await
    }

    async fn count(&self) -> StoreResult<i64> {
        self.reachable()?;
        self.inner.count().await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.reachable()
    }
}
