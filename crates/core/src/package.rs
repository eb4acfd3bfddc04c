//! Travel-package validation, field parsing, and primary-image resolution.

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_DRAFT: &str = "DRAFT";
pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_INACTIVE: &str = "INACTIVE";

/// All valid package statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_ACTIVE, STATUS_INACTIVE];

/// Validate a package status against the known set.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{}'. Valid statuses: {}",
            status,
            VALID_STATUSES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Field validation / parsing
// ---------------------------------------------------------------------------

/// Validate a package or article title (non-empty, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Field 'title' must not be empty".into()));
    }
    if title.len() > 200 {
        return Err(CoreError::Validation(
            "Field 'title' must be at most 200 characters".into(),
        ));
    }
    Ok(())
}

/// Parse a decimal form field (e.g. `price`). The field name is carried in
/// the error so the caller can surface field-level detail.
pub fn parse_decimal_field(name: &str, raw: &str) -> Result<f64, CoreError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("Field '{name}' must be a number")))?;
    if value < 0.0 {
        return Err(CoreError::Validation(format!(
            "Field '{name}' must not be negative"
        )));
    }
    Ok(value)
}

/// Parse a non-negative integer form field (e.g. `maxGuests`, `suites`).
pub fn parse_int_field(name: &str, raw: &str) -> Result<i32, CoreError> {
    let value: i32 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("Field '{name}' must be an integer")))?;
    if value < 0 {
        return Err(CoreError::Validation(format!(
            "Field '{name}' must not be negative"
        )));
    }
    Ok(value)
}

/// Parse an entity-id form field (e.g. `typeId`, `categoryId`).
pub fn parse_id_field(name: &str, raw: &str) -> Result<i64, CoreError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("Field '{name}' must be an id")))?;
    if value < 1 {
        return Err(CoreError::Validation(format!(
            "Field '{name}' must be a positive id"
        )));
    }
    Ok(value)
}

/// Parse a date form field. Accepts `YYYY-MM-DD` (interpreted as midnight
/// UTC) or a full RFC 3339 timestamp.
pub fn parse_date_field(name: &str, raw: &str) -> Result<Timestamp, CoreError> {
    let raw = raw.trim();
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| CoreError::Internal(format!("Invalid midnight for date '{raw}'")))?;
        return Ok(midnight.and_utc());
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|_| {
            CoreError::Validation(format!(
                "Field '{name}' must be a date (YYYY-MM-DD or RFC 3339)"
            ))
        })
}

// ---------------------------------------------------------------------------
// Primary image resolution
// ---------------------------------------------------------------------------

/// Mark exactly one image reference as primary.
///
/// `candidates` pairs each stored reference path with the key a client may use
/// to designate it as the main image (the original filename for fresh
/// uploads, the reference path itself for kept images). When `main_key`
/// matches no candidate (or is absent), the first candidate becomes primary.
/// An empty candidate list yields an empty result; more than one primary is
/// impossible by construction.
pub fn mark_primary(
    candidates: Vec<(String, String)>,
    main_key: Option<&str>,
) -> Vec<(String, bool)> {
    let chosen = main_key
        .and_then(|key| candidates.iter().position(|(_, k)| k == key))
        .unwrap_or(0);

    candidates
        .into_iter()
        .enumerate()
        .map(|(i, (url, _))| (url, i == chosen))
        .collect()
}
