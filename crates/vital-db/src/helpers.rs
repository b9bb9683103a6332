//! Row-to-entity parsing helpers and storage formats.
//!
//! Dates are stored as `YYYY-MM-DD`, datetimes as `YYYY-MM-DD HH:MM:SS`.
//! The datetime storage format sorts lexicographically, which is what the
//! inclusive range filters compare against.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::DatabaseError;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a datetime the way the tables store and compare it.
#[must_use]
pub fn fmt_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Format a date the way the tables store it.
#[must_use]
pub fn fmt_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Parse a required TEXT column as `NaiveDate`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

/// Parse a required TEXT column as `NaiveDateTime`.
///
/// Handles the storage format and the RFC 3339-style `T` separator, in case
/// a row was written by an external tool.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string matches neither format.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, DatabaseError> {
    for format in [DATETIME_FORMAT, "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }
    Err(DatabaseError::Query(format!(
        "Failed to parse datetime '{s}'"
    )))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all vital-core enums, which use explicit serde renames to
/// their wire values.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Parse a TEXT column holding an exact decimal.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not a decimal number.
pub fn parse_decimal(s: &str) -> Result<Decimal, DatabaseError> {
    s.parse::<Decimal>()
        .map_err(|e| DatabaseError::Query(format!("Failed to parse decimal '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty
/// string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vital_core::enums::{BloodType, ConsultationStatus};

    #[test]
    fn datetime_roundtrips_through_storage_format() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let stored = fmt_datetime(dt);
        assert_eq!(stored, "2024-01-31 23:59:59");
        assert_eq!(parse_datetime(&stored).unwrap(), dt);
        assert_eq!(parse_datetime("2024-01-31T23:59:59").unwrap(), dt);
    }

    #[test]
    fn enums_parse_from_wire_values() {
        assert_eq!(parse_enum::<BloodType>("AB-").unwrap(), BloodType::AbNegative);
        assert_eq!(
            parse_enum::<ConsultationStatus>("EN_CURSO").unwrap(),
            ConsultationStatus::InProgress
        );
        assert!(parse_enum::<BloodType>("Z+").is_err());
    }

    #[test]
    fn decimal_parsing() {
        assert_eq!(parse_decimal("1290.50").unwrap().to_string(), "1290.50");
        assert!(parse_decimal("mil").is_err());
    }
}
