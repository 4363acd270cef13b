//! Paginated listing for the admin table.

use beasiswa_core::error::CoreError;
use beasiswa_core::pagination::{PageMeta, PageRequest};
use beasiswa_db::models::application::Application;
use beasiswa_db::store::ApplicationStore;

/// One window of records plus its metadata.
#[derive(Debug)]
pub struct ApplicationPage {
    pub records: Vec<Application>,
    pub meta: PageMeta,
}

/// Fetch the window for `request`, newest registrations first.
///
/// Pages past the end yield an empty window with accurate metadata.
pub async fn list_applications(
    store: &dyn ApplicationStore,
    request: PageRequest,
) -> Result<ApplicationPage, CoreError> {
    let total = store.count().await?;
    let records = store.page(request.page_size(), request.offset()).await?;
    Ok(ApplicationPage {
        records,
        meta: request.meta(total),
    })
}
