use std::collections::BTreeMap;

use async_trait::async_trait;
use beasiswa_core::application::{NaturalKey, NewApplication, ReviewUpdate};
use beasiswa_core::types::DbId;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{AdminStore, ApplicationStore, StoreError, StoreResult};
use crate::models::admin::{Admin, CreateAdmin};
use crate::models::application::Application;

struct Table<T> {
    next_id: DbId,
    rows: BTreeMap<DbId, T>,
}

// Hand-written so `T` need not be `Default`.
impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process [`ApplicationStore`] with the same uniqueness and ordering
/// rules as the Postgres schema.
#[derive(Default)]
pub struct MemoryApplicationStore {
    table: RwLock<Table<Application>>,
}

impl MemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationStore for MemoryApplicationStore {
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Application>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_natural_key(&self, key: &NaturalKey) -> StoreResult<Option<Application>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|row| row.nim == key.nim() && row.email == key.email())
            .cloned())
    }

    async fn insert(&self, input: &NewApplication) -> StoreResult<Application> {
        let mut table = self.table.write().await;
        let taken = table
            .rows
            .values()
            .any(|row| row.nim == input.nim && row.email == input.email);
        if taken {
            return Err(StoreError::DuplicateKey("uq_applications_nim_email".into()));
        }

        let now = Utc::now();
        let id = table.allocate_id();
        let row = Application {
            id,
            nim: input.nim.clone(),
            email: input.email.clone(),
            nama_lengkap: input.nama_lengkap.clone(),
            nomor_telepon: input.nomor_telepon.clone(),
            alamat: input.alamat.clone(),
            ipk: input.ipk,
            penghasilan_keluarga: input.penghasilan_keluarga,
            essay: input.essay.clone(),
            dokumen_pendukung: input.dokumen_pendukung.clone(),
            rekomendasi: input.rekomendasi.clone(),
            status: input.status,
            tahap: input.tahap,
            catatan: input.catatan.clone(),
            tanggal_daftar: now,
            tanggal_update: now,
        };
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn replace_fields(
        &self,
        id: DbId,
        input: &NewApplication,
    ) -> StoreResult<Option<Application>> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.nama_lengkap = input.nama_lengkap.clone();
        row.nomor_telepon = input.nomor_telepon.clone();
        row.alamat = input.alamat.clone();
        row.ipk = input.ipk;
        row.penghasilan_keluarga = input.penghasilan_keluarga;
        row.essay = input.essay.clone();
        row.dokumen_pendukung = input.dokumen_pendukung.clone();
        row.rekomendasi = input.rekomendasi.clone();
        row.status = input.status;
        row.tahap = input.tahap;
        row.catatan = input.catatan.clone();
        row.tanggal_update = Utc::now().max(row.tanggal_daftar);
        Ok(Some(row.clone()))
    }

    async fn update_review(
        &self,
        id: DbId,
        input: &ReviewUpdate,
    ) -> StoreResult<Option<Application>> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(status) = input.status {
            row.status = status;
        }
        if let Some(tahap) = input.tahap {
            row.tahap = tahap;
        }
        if let Some(catatan) = &input.catatan {
            row.catatan = catatan.clone();
        }
        row.tanggal_update = Utc::now().max(row.tanggal_daftar);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn page(&self, limit: i64, offset: i64) -> StoreResult<Vec<Application>> {
        let table = self.table.read().await;
        let mut rows: Vec<&Application> = table.rows.values().collect();
        rows.sort_by(|a, b| {
            b.tanggal_daftar
                .cmp(&a.tanggal_daftar)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.table.read().await.rows.len() as i64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// In-process [`AdminStore`].
#[derive(Default)]
pub struct MemoryAdminStore {
    table: RwLock<Table<Admin>>,
}

impl MemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Admin>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|admin| admin.username == username)
            .cloned())
    }

    async fn create(&self, input: &CreateAdmin) -> StoreResult<Admin> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|a| a.username == input.username) {
            return Err(StoreError::DuplicateKey("uq_admins_username".into()));
        }
        let id = table.allocate_id();
        let admin = Admin {
            id,
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            created_at: Utc::now(),
        };
        table.rows.insert(id, admin.clone());
        Ok(admin)
    }
}
