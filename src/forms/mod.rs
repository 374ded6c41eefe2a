//! Form definitions backing the dashboard routes.
//!
//! HTML forms post every field as text, so optional numbers and dates arrive
//! as possibly blank strings. Each form validates what `validator` can check
//! and converts itself into a write payload through `TryFrom`.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::dates::{parse_date, parse_datetime};
use crate::domain::types::TypeConstraintError;

pub mod expenses;
pub mod holidays;
pub mod members;
pub mod partners;
pub mod payments;
pub mod settings;
pub mod upload;
pub mod whatsapp;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Constraint(TypeConstraintError),

    #[error("invalid number in field `{0}`")]
    InvalidNumber(&'static str),

    #[error("invalid date in field `{0}`")]
    InvalidDate(&'static str),

    #[error("Please select a file to upload")]
    MissingFile,

    #[error("Only .xlsx and .xls files can be uploaded")]
    UnsupportedFile,

    #[error("could not read the uploaded file: {0}")]
    UnreadableFile(String),
}

/// Parses a field that may be left blank.
pub(crate) fn optional_number<T: FromStr>(
    raw: &str,
    field: &'static str,
) -> Result<Option<T>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| FormError::InvalidNumber(field))
}

pub(crate) fn required_number<T: FromStr>(raw: &str, field: &'static str) -> Result<T, FormError> {
    optional_number(raw, field)?.ok_or(FormError::InvalidNumber(field))
}

pub(crate) fn optional_date(raw: &str, field: &'static str) -> Result<Option<NaiveDate>, FormError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw).map(Some).ok_or(FormError::InvalidDate(field))
}

pub(crate) fn required_date(raw: &str, field: &'static str) -> Result<NaiveDate, FormError> {
    optional_date(raw, field)?.ok_or(FormError::InvalidDate(field))
}

/// Accepts both `datetime-local` input values and full ISO timestamps.
pub(crate) fn optional_datetime(
    raw: &str,
    field: &'static str,
) -> Result<Option<NaiveDateTime>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_datetime(raw)
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").ok())
        .map(Some)
        .ok_or(FormError::InvalidDate(field))
}

/// Blank text becomes `None`, anything else is trimmed.
pub(crate) fn optional_text(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_fields_are_none() {
        assert_eq!(optional_number::<f64>("  ", "weight").unwrap(), None);
        assert_eq!(optional_number::<f64>("72.5", "weight").unwrap(), Some(72.5));
        assert!(matches!(
            optional_number::<u32>("abc", "advance_in_months"),
            Err(FormError::InvalidNumber("advance_in_months"))
        ));
        assert_eq!(optional_text("  "), None);
    }

    #[test]
    fn datetime_local_values_parse() {
        let parsed = optional_datetime("2025-03-01T09:30", "paid_on").unwrap();
        assert_eq!(
            parsed.map(|value| value.format("%H:%M").to_string()).as_deref(),
            Some("09:30")
        );
        assert!(required_date("", "doj").is_err());
    }
}
