//! Single-record create / read / update / delete.

use beasiswa_core::application::{NewApplication, ReviewUpdate};
use beasiswa_core::error::CoreError;
use beasiswa_core::types::DbId;
use beasiswa_db::models::application::Application;
use beasiswa_db::store::ApplicationStore;

const ENTITY: &str = "Application";

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}

fn duplicate(input: &NewApplication) -> CoreError {
    CoreError::DuplicateKey(format!(
        "an application for nim '{}' and email '{}' already exists",
        input.nim, input.email
    ))
}

/// Validate and insert a new record.
///
/// The natural-key pre-check is only a fast path; the store's uniqueness
/// constraint decides races, and its rejection surfaces the same way.
pub async fn create(
    store: &dyn ApplicationStore,
    input: NewApplication,
) -> Result<Application, CoreError> {
    let input = input.normalized().map_err(CoreError::Validation)?;

    if store.find_by_natural_key(&input.natural_key()).await?.is_some() {
        return Err(duplicate(&input));
    }

    match store.insert(&input).await {
        Ok(app) => {
            tracing::info!(id = app.id, nim = %app.nim, "Application created");
            Ok(app)
        }
        Err(beasiswa_db::store::StoreError::DuplicateKey(_)) => Err(duplicate(&input)),
        Err(e) => Err(e.into()),
    }
}

pub async fn get(store: &dyn ApplicationStore, id: DbId) -> Result<Application, CoreError> {
    store.find_by_id(id).await?.ok_or_else(|| not_found(id))
}

/// Apply a status / stage / notes change. An empty update is rejected.
pub async fn update(
    store: &dyn ApplicationStore,
    id: DbId,
    update: ReviewUpdate,
) -> Result<Application, CoreError> {
    if update.is_empty() {
        return Err(CoreError::invalid(
            "body",
            "at least one of status, tahap or catatan is required",
        ));
    }

    let app = store
        .update_review(id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, status = %app.status, tahap = %app.tahap, "Application updated");
    Ok(app)
}

/// Remove a record. A second delete of the same id is `NotFound`.
pub async fn delete(store: &dyn ApplicationStore, id: DbId) -> Result<(), CoreError> {
    if !store.delete(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "Application deleted");
    Ok(())
}
