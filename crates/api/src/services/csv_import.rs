//! CSV import reconciliation.
//!
//! Rows are applied one at a time, in file order, each as an independent
//! match-or-create against the natural key. A bad row is reported and
//! skipped; only an unreadable file or an unreachable store fails the call.

use beasiswa_core::application::NewApplication;
use beasiswa_core::csv_import::{parse_csv, ImportReport, RowError};
use beasiswa_core::error::CoreError;
use beasiswa_db::store::{ApplicationStore, StoreError};

enum Applied {
    Created,
    Updated,
}

/// Parse `content` and reconcile every valid row with the store.
pub async fn import_csv(
    store: &dyn ApplicationStore,
    content: &[u8],
) -> Result<ImportReport, CoreError> {
    let rows = parse_csv(content)?;
    let mut report = ImportReport {
        success: true,
        ..Default::default()
    };

    for parsed in rows {
        let input = match parsed.outcome {
            Ok(input) => input,
            Err(violation) => {
                tracing::warn!(row = parsed.row, reason = %violation, "Skipping invalid CSV row");
                report.errors.push(RowError {
                    row: parsed.row,
                    nim: parsed.nim,
                    reason: violation.to_string(),
                });
                continue;
            }
        };

        match apply_row(store, &input).await {
            Ok(Applied::Created) => report.records_created += 1,
            Ok(Applied::Updated) => report.records_updated += 1,
            Err(RowFailure::Skip(reason)) => {
                tracing::warn!(row = parsed.row, nim = %input.nim, %reason, "CSV row not applied");
                report.errors.push(RowError {
                    row: parsed.row,
                    nim: Some(input.nim.clone()),
                    reason,
                });
                continue;
            }
            Err(RowFailure::Abort(err)) => {
                tracing::error!(row = parsed.row, error = %err, "Aborting CSV import");
                return Err(err);
            }
        }
        report.records_processed += 1;
    }

    tracing::info!(
        processed = report.records_processed,
        created = report.records_created,
        updated = report.records_updated,
        failed = report.errors.len(),
        "CSV import finished"
    );
    Ok(report)
}

enum RowFailure {
    /// Recorded against the row; the batch continues.
    Skip(String),
    /// Fatal to the whole import.
    Abort(CoreError),
}

impl From<StoreError> for RowFailure {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(_) => RowFailure::Skip(
                "a record with this nim and email was created concurrently".to_string(),
            ),
            other => RowFailure::Abort(other.into()),
        }
    }
}

async fn apply_row(
    store: &dyn ApplicationStore,
    input: &NewApplication,
) -> Result<Applied, RowFailure> {
    match store.find_by_natural_key(&input.natural_key()).await? {
        Some(existing) => match store.replace_fields(existing.id, input).await? {
            Some(_) => Ok(Applied::Updated),
            None => Err(RowFailure::Skip(
                "the matching record was deleted during import".to_string(),
            )),
        },
        None => {
            store.insert(input).await?;
            Ok(Applied::Created)
        }
    }
}
