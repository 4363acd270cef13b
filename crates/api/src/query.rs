//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page-based listing parameters (`?page=&page_size=`).
///
/// Validated and clamped by [`beasiswa_core::pagination::PageRequest`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
