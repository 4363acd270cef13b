//! Field-level validation primitives shared by record creation and CSV import.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};

/// Inclusive upper bound of the grade-point scale.
pub const MAX_IPK: f64 = 4.0;

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldViolation {}

/// `validator` custom rule: the contact address must contain an `@`.
pub fn validate_contact_address(value: &str) -> Result<(), ValidationError> {
    if value.contains('@') {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("must contain '@'".into()))
    }
}

/// `validator` custom rule: grade point must be a finite number in `[0, 4]`.
///
/// Written by hand because the built-in range rule lets `NaN` through.
pub fn validate_ipk(value: &f64) -> Result<(), ValidationError> {
    if value.is_finite() && (0.0..=MAX_IPK).contains(value) {
        Ok(())
    } else {
        Err(ValidationError::new("range").with_message("must be between 0 and 4".into()))
    }
}

/// Collapse `validator` output into the first violation, in declaration order.
///
/// `field_order` lists the struct's fields so the reported violation does not
/// depend on hash-map iteration order.
pub fn first_violation(errors: &ValidationErrors, field_order: &[&str]) -> FieldViolation {
    let by_field = errors.field_errors();
    for field in field_order {
        if let Some(first) = by_field.get(*field).and_then(|errs| errs.first()) {
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("failed rule '{}'", first.code));
            return FieldViolation::new(field, message);
        }
    }
    FieldViolation::new("unknown", errors.to_string())
}

/// Parse a grade-point cell. Accepts a decimal comma (`3,45`).
pub fn parse_ipk(raw: &str) -> Result<f64, FieldViolation> {
    let normalized = raw.trim().replace(',', ".");
    let value: f64 = normalized
        .parse()
        .map_err(|_| FieldViolation::new("ipk", format!("'{raw}' is not a number")))?;
    validate_ipk(&value).map_err(|_| FieldViolation::new("ipk", "must be between 0 and 4"))?;
    Ok(value)
}

/// Parse a family-income cell into a non-negative integer.
pub fn parse_income(raw: &str) -> Result<i64, FieldViolation> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        FieldViolation::new(
            "penghasilan_keluarga",
            format!("'{raw}' is not a whole number"),
        )
    })?;
    if value < 0 {
        return Err(FieldViolation::new(
            "penghasilan_keluarga",
            "must not be negative",
        ));
    }
    Ok(value)
}
