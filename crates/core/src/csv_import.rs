//! CSV template parsing and per-row validation for bulk import.
//!
//! This module only turns bytes into validated [`NewApplication`] values (or
//! row-level violations). Matching rows against stored records happens in
//! the API crate, which owns the store.

use std::collections::HashMap;

use serde::Serialize;

use crate::application::{
    normalize_notes, ApplicationStatus, NewApplication, ReviewStage,
};
use crate::error::CoreError;
use crate::validation::{parse_income, parse_ipk, FieldViolation};

// ── Columns ──────────────────────────────────────────────────────────

/// Every column name recognized in the import header, in template order.
pub const RECOGNIZED_COLUMNS: [&str; 13] = [
    "nim",
    "email",
    "nama_lengkap",
    "nomor_telepon",
    "alamat",
    "ipk",
    "penghasilan_keluarga",
    "essay",
    "dokumen_pendukung",
    "rekomendasi",
    "status",
    "tahap",
    "catatan",
];

/// Columns without which no row could ever be valid.
pub const REQUIRED_COLUMNS: [&str; 4] = ["nim", "email", "nama_lengkap", "status"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Maps recognized column names to their position in the uploaded file.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    positions: HashMap<&'static str, usize>,
    /// Number of header cells, blank ones included.
    width: usize,
}

impl HeaderMap {
    /// Validate a header row. Column order is free; unknown, duplicated or
    /// missing required columns make the file unusable.
    pub fn parse<'a, I>(headers: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions = HashMap::new();
        let mut seen_any = false;
        let mut width = 0;

        for (idx, raw) in headers.into_iter().enumerate() {
            width = idx + 1;
            let name = raw.trim();
            if name.is_empty() {
                continue;
            }
            seen_any = true;
            let column = RECOGNIZED_COLUMNS
                .iter()
                .copied()
                .find(|c| *c == name)
                .ok_or_else(|| {
                    CoreError::MalformedInput(format!("unrecognized column '{name}' in header"))
                })?;
            if positions.insert(column, idx).is_some() {
                return Err(CoreError::MalformedInput(format!(
                    "column '{column}' appears more than once in header"
                )));
            }
        }

        if !seen_any {
            return Err(CoreError::MalformedInput("missing header row".into()));
        }

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !positions.contains_key(c))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::MalformedInput(format!(
                "header is missing required column(s): {}",
                missing.join(", ")
            )));
        }

        Ok(Self { positions, width })
    }

    /// Number of non-blank cells past the header's last column.
    fn overflow(&self, record: &csv::StringRecord) -> usize {
        record
            .iter()
            .skip(self.width)
            .filter(|cell| !cell.trim().is_empty())
            .count()
    }

    /// Trimmed cell value for `column`, or `""` when the column is absent or
    /// the row is short.
    fn cell<'r>(&self, record: &'r csv::StringRecord, column: &str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|idx| record.get(*idx))
            .map(str::trim)
            .unwrap_or("")
    }
}

// ── Rows ─────────────────────────────────────────────────────────────

/// One data row after parsing and validation.
#[derive(Debug, Clone)]
pub struct ParsedRow {
    /// 1-based line number in the file; the header is row 1.
    pub row: u64,
    /// Raw identifier cell, kept for error reports.
    pub nim: Option<String>,
    pub outcome: Result<NewApplication, FieldViolation>,
}

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    pub row: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nim: Option<String>,
    pub reason: String,
}

/// Outcome of one import call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub success: bool,
    pub records_processed: u64,
    pub records_created: u64,
    pub records_updated: u64,
    pub errors: Vec<RowError>,
}

/// Decode an uploaded CSV and validate every data row independently.
///
/// Fails only when the file as a whole is unreadable (empty, not UTF-8,
/// or a bad header). Row problems are returned inside [`ParsedRow::outcome`].
pub fn parse_csv(content: &[u8]) -> Result<Vec<ParsedRow>, CoreError> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    let text = std::str::from_utf8(content)
        .map_err(|e| CoreError::MalformedInput(format!("file is not valid UTF-8: {e}")))?;
    if text.trim().is_empty() {
        return Err(CoreError::MalformedInput("file is empty".into()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header = reader
        .headers()
        .map_err(|e| CoreError::MalformedInput(format!("unreadable header row: {e}")))?
        .clone();
    let columns = HeaderMap::parse(header.iter())?;

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut last_row = 1;
    loop {
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let row = record.position().map(|p| p.line()).unwrap_or(last_row + 1);
                last_row = row;
                if record.iter().all(|cell| cell.trim().is_empty()) {
                    continue;
                }
                let nim = Some(columns.cell(&record, "nim").to_string()).filter(|s| !s.is_empty());
                let extra = columns.overflow(&record);
                let outcome = if extra > 0 {
                    Err(FieldViolation::new(
                        "row",
                        format!(
                            "has {extra} cell(s) beyond the {} header columns",
                            columns.width
                        ),
                    ))
                } else {
                    parse_record(&columns, &record)
                };
                rows.push(ParsedRow { row, nim, outcome });
            }
            Err(e) => {
                let row = e.position().map(|p| p.line()).unwrap_or(last_row + 1);
                last_row = row;
                rows.push(ParsedRow {
                    row,
                    nim: None,
                    outcome: Err(FieldViolation::new("row", format!("unreadable row: {e}"))),
                });
                // A positionless error means the reader cannot make progress.
                if e.position().is_none() {
                    break;
                }
            }
        }
    }

    Ok(rows)
}

/// Build a validated application from one record.
///
/// Checks run in a fixed order (identifier, address, name, status, stage,
/// grade point, income) so the reported reason is stable.
pub fn parse_record(
    columns: &HeaderMap,
    record: &csv::StringRecord,
) -> Result<NewApplication, FieldViolation> {
    let cell = |name: &str| columns.cell(record, name);

    for required in ["nim", "email", "nama_lengkap"] {
        if cell(required).is_empty() {
            return Err(FieldViolation::new(required, "is required"));
        }
    }
    if !cell("email").contains('@') {
        return Err(FieldViolation::new("email", "must contain '@'"));
    }

    let status: ApplicationStatus = match cell("status") {
        "" => return Err(FieldViolation::new("status", "is required")),
        raw => raw.parse()?,
    };
    let tahap: ReviewStage = match cell("tahap") {
        "" => ReviewStage::default(),
        raw => raw.parse()?,
    };
    let ipk = match cell("ipk") {
        "" => 0.0,
        raw => parse_ipk(raw)?,
    };
    let penghasilan_keluarga = match cell("penghasilan_keluarga") {
        "" => 0,
        raw => parse_income(raw)?,
    };

    NewApplication {
        nim: cell("nim").to_string(),
        email: cell("email").to_string(),
        nama_lengkap: cell("nama_lengkap").to_string(),
        nomor_telepon: cell("nomor_telepon").to_string(),
        alamat: cell("alamat").to_string(),
        ipk,
        penghasilan_keluarga,
        essay: cell("essay").to_string(),
        dokumen_pendukung: cell("dokumen_pendukung").to_string(),
        rekomendasi: cell("rekomendasi").to_string(),
        status,
        tahap,
        catatan: normalize_notes(Some(cell("catatan"))),
    }
    .normalized()
}
