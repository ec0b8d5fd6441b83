//! Validation helpers for DTOs.

use std::borrow::Cow;

use time::Date;
use validator::ValidationError;

use crate::clock::parse_date;

/// Build a [`ValidationError`] carrying a user-facing message.
pub fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Rejects values that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Requires a `YYYY-MM-DD` calendar date that actually exists.
///
/// ```ignore
/// parse_calendar_date("2024-02-29") // Ok
/// parse_calendar_date("2023-02-29") // Err - not a real day
/// parse_calendar_date("29/02/2024") // Err - wrong format
/// ```
pub fn parse_calendar_date(value: &str) -> Result<Date, ValidationError> {
    parse_date(value)
        .map_err(|_| error_with_message("date_format", "Date must be a valid calendar date"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(validate_not_blank("idea").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \t\n").is_err());
    }

    #[test]
    fn calendar_dates_must_exist() {
        assert!(parse_calendar_date("2024-02-29").is_ok());
        assert!(parse_calendar_date(" 2024-01-01 ").is_ok());
        assert!(parse_calendar_date("2023-02-29").is_err());
        assert!(parse_calendar_date("2024-13-01").is_err());
        assert!(parse_calendar_date("01/02/2024").is_err());

        let err = parse_calendar_date("soon").unwrap_err();
        assert_eq!(
            err.message.as_deref(),
            Some("Date must be a valid calendar date")
        );
    }
}
