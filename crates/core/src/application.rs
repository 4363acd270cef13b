//! Scholarship application domain types.
//!
//! The Indonesian field and enum spellings are the wire contract shared with
//! the frontend and the CSV template, so they are kept verbatim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::validation::{first_violation, validate_contact_address, validate_ipk, FieldViolation};

// ── Status / stage ───────────────────────────────────────────────────

/// Review outcome of an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    #[serde(rename = "Dalam Review")]
    UnderReview,
    #[serde(rename = "Diterima")]
    Accepted,
    #[serde(rename = "Ditolak")]
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 3] = [Self::UnderReview, Self::Accepted, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderReview => "Dalam Review",
            Self::Accepted => "Diterima",
            Self::Rejected => "Ditolak",
        }
    }
}

/// Phase of review an application is in, independent of its status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewStage {
    #[default]
    #[serde(rename = "Administrasi")]
    Administrative,
    #[serde(rename = "Wawancara")]
    Interview,
    #[serde(rename = "Final")]
    Final,
}

impl ReviewStage {
    pub const ALL: [ReviewStage; 3] = [Self::Administrative, Self::Interview, Self::Final];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrative => "Administrasi",
            Self::Interview => "Wawancara",
            Self::Final => "Final",
        }
    }
}

/// Implements `Display`, `FromStr` and `TryFrom<String>` in terms of `ALL`
/// and `as_str`, so the accepted spellings live in exactly one place.
macro_rules! string_enum {
    ($ty:ident, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = FieldViolation;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        FieldViolation::new(
                            $field,
                            format!("'{s}' is not one of: {}", allowed.join(", ")),
                        )
                    })
            }
        }

        impl TryFrom<String> for $ty {
            type Error = FieldViolation;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

string_enum!(ApplicationStatus, "status");
string_enum!(ReviewStage, "tahap");

// ── Natural key ──────────────────────────────────────────────────────

/// The `(nim, email)` pair that identifies an applicant.
///
/// Construction normalizes both parts (trim; email lowercased) so that keys
/// built from stored records, lookups and CSV rows always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NaturalKey {
    nim: String,
    email: String,
}

impl NaturalKey {
    pub fn new(nim: &str, email: &str) -> Self {
        Self {
            nim: normalize_nim(nim),
            email: normalize_email(email),
        }
    }

    /// Build a key for a public lookup. Both parts are required.
    pub fn for_lookup(nim: &str, email: &str) -> Result<Self, CoreError> {
        let key = Self::new(nim, email);
        if key.nim.is_empty() {
            return Err(CoreError::invalid("nim", "is required"));
        }
        if key.email.is_empty() {
            return Err(CoreError::invalid("email", "is required"));
        }
        Ok(key)
    }

    pub fn nim(&self) -> &str {
        &self.nim
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

pub fn normalize_nim(raw: &str) -> String {
    raw.trim().to_string()
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

// ── New application ──────────────────────────────────────────────────

/// Field order used when reporting the first validation failure.
const FIELD_ORDER: &[&str] = &[
    "nim",
    "email",
    "nama_lengkap",
    "ipk",
    "penghasilan_keluarga",
];

// `validator` passes `Copy` fields by value; adapt to `validate_ipk(&f64)`.
fn validate_ipk_by_value(value: f64) -> Result<(), validator::ValidationError> {
    validate_ipk(&value)
}

/// A fully specified application ready to be inserted, or to overwrite the
/// non-key fields of an existing record during import.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewApplication {
    #[validate(length(min = 1, message = "is required"))]
    pub nim: String,
    #[validate(
        length(min = 1, message = "is required"),
        custom(function = "validate_contact_address")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub nama_lengkap: String,
    pub nomor_telepon: String,
    pub alamat: String,
    #[validate(custom(function = "validate_ipk_by_value"))]
    pub ipk: f64,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub penghasilan_keluarga: i64,
    pub essay: String,
    pub dokumen_pendukung: String,
    pub rekomendasi: String,
    pub status: ApplicationStatus,
    pub tahap: ReviewStage,
    pub catatan: Option<String>,
}

impl NewApplication {
    /// Normalize text fields in place, then run the field rules.
    pub fn normalized(mut self) -> Result<Self, FieldViolation> {
        self.nim = normalize_nim(&self.nim);
        self.email = normalize_email(&self.email);
        self.nama_lengkap = self.nama_lengkap.trim().to_string();
        self.nomor_telepon = self.nomor_telepon.trim().to_string();
        self.alamat = self.alamat.trim().to_string();
        self.essay = self.essay.trim().to_string();
        self.dokumen_pendukung = self.dokumen_pendukung.trim().to_string();
        self.rekomendasi = self.rekomendasi.trim().to_string();
        self.catatan = normalize_notes(self.catatan.as_deref());

        self.validate()
            .map_err(|errors| first_violation(&errors, FIELD_ORDER))?;
        Ok(self)
    }

    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::new(&self.nim, &self.email)
    }
}

/// Blank notes mean "no notes".
pub fn normalize_notes(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ── Review update ────────────────────────────────────────────────────

/// The mutable subset of an application after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewUpdate {
    pub status: Option<ApplicationStatus>,
    pub tahap: Option<ReviewStage>,
    /// `Some(None)` clears the notes; `None` leaves them untouched.
    pub catatan: Option<Option<String>>,
}

impl ReviewUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.tahap.is_none() && self.catatan.is_none()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn sample() -> NewApplication {
        NewApplication {
            nim: " 13520001 ".into(),
            email: " Budi@ITB.ac.id".into(),
            nama_lengkap: "Budi Santoso".into(),
            nomor_telepon: "08123456789".into(),
            alamat: "Jl. Ganesha 10".into(),
            ipk: 3.5,
            penghasilan_keluarga: 4_000_000,
            essay: "Saya ingin belajar.".into(),
            dokumen_pendukung: String::new(),
            rekomendasi: String::new(),
            status: ApplicationStatus::default(),
            tahap: ReviewStage::default(),
            catatan: Some("   ".into()),
        }
    }

    #[test]
    fn status_round_trips_through_wire_strings() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>().unwrap(), status);
        }
        assert_eq!(ApplicationStatus::UnderReview.to_string(), "Dalam Review");
    }

    #[test]
    fn unknown_status_is_rejected_with_field_name() {
        let err = "Pending".parse::<ApplicationStatus>().unwrap_err();
        assert_eq!(err.field, "status");
        assert!(err.message.contains("Dalam Review"));
    }

    #[test]
    fn stage_defaults_to_administrative() {
        assert_eq!(ReviewStage::default(), ReviewStage::Administrative);
        assert_eq!(ReviewStage::default().as_str(), "Administrasi");
        assert!("wawancara".parse::<ReviewStage>().is_err());
    }

    #[test]
    fn natural_key_is_trimmed_and_email_lowercased() {
        let key = NaturalKey::new(" 13520001\t", " Budi@ITB.ac.id ");
        assert_eq!(key.nim(), "13520001");
        assert_eq!(key.email(), "budi@itb.ac.id");
        assert_eq!(key, NaturalKey::new("13520001", "budi@itb.ac.id"));
    }

    #[test]
    fn lookup_key_requires_both_parts() {
        assert_matches!(
            NaturalKey::for_lookup("  ", "a@b.c"),
            Err(CoreError::Validation(v)) if v.field == "nim"
        );
        assert_matches!(
            NaturalKey::for_lookup("1352", ""),
            Err(CoreError::Validation(v)) if v.field == "email"
        );
    }

    #[test]
    fn normalized_trims_and_clears_blank_notes() {
        let app = sample().normalized().unwrap();
        assert_eq!(app.nim, "13520001");
        assert_eq!(app.email, "budi@itb.ac.id");
        assert_eq!(app.catatan, None);
    }

    #[test]
    fn normalized_reports_first_failing_field() {
        let mut app = sample();
        app.nama_lengkap = " ".into();
        app.ipk = 5.0;
        let violation = app.normalized().unwrap_err();
        assert_eq!(violation.field, "nama_lengkap");
    }

    #[test]
    fn normalized_rejects_address_without_at_sign() {
        let mut app = sample();
        app.email = "budi.itb.ac.id".into();
        let violation = app.normalized().unwrap_err();
        assert_eq!(violation.field, "email");
        assert_eq!(violation.message, "must contain '@'");
    }

    #[test]
    fn normalized_rejects_negative_income() {
        let mut app = sample();
        app.penghasilan_keluarga = -5;
        let violation = app.normalized().unwrap_err();
        assert_eq!(violation.field, "penghasilan_keluarga");
    }

    #[test]
    fn empty_review_update_is_detected() {
        assert!(ReviewUpdate::default().is_empty());
        let update = ReviewUpdate {
            catatan: Some(None),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
