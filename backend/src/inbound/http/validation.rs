//! Shared request parsing helpers for inbound HTTP adapters.
//!
//! Request DTOs keep every field optional so a missing value is reported as
//! a 400 naming the field rather than a generic deserialisation failure.
//! The helpers here turn raw values into domain types and attach
//! `{ field, code }` details to every rejection.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{BoundedText, Error, InvalidId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    InvalidUuid,
    InvalidDate,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

pub(crate) fn invalid_field_error(field: FieldName, reason: impl Display) -> Error {
    let name = field.as_str();
    field_error(field, ErrorCode::InvalidValue, format!("{name}: {reason}"))
}

/// Unwrap a required value.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a required field with `parse`, naming the field on failure.
pub(crate) fn parse_required<T, E, F>(
    value: Option<String>,
    field: FieldName,
    parse: F,
) -> Result<T, Error>
where
    E: Display,
    F: FnOnce(&str) -> Result<T, E>,
{
    let raw = require(value, field)?;
    parse(&raw).map_err(|err| invalid_field_error(field, err))
}

/// Parse an optional field; absent values stay `None`.
pub(crate) fn parse_optional<T, E, F>(
    value: Option<String>,
    field: FieldName,
    parse: F,
) -> Result<Option<T>, Error>
where
    E: Display,
    F: FnOnce(&str) -> Result<T, E>,
{
    value
        .map(|raw| parse(&raw).map_err(|err| invalid_field_error(field, err)))
        .transpose()
}

/// Required free text bounded to `max` characters.
pub(crate) fn required_text(
    value: Option<String>,
    field: FieldName,
    max: usize,
) -> Result<BoundedText, Error> {
    parse_required(value, field, |raw| BoundedText::new(raw, max))
}

/// Optional free text bounded to `max` characters. Blank input counts as
/// absent.
pub(crate) fn optional_text(
    value: Option<String>,
    field: FieldName,
    max: usize,
) -> Result<Option<BoundedText>, Error> {
    let value = value.filter(|raw| !raw.trim().is_empty());
    parse_optional(value, field, |raw| BoundedText::new(raw, max))
}

/// Parse a path or body identifier.
pub(crate) fn parse_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = InvalidId>,
{
    value.parse().map_err(|_| {
        let name = field.as_str();
        field_error(
            field,
            ErrorCode::InvalidUuid,
            format!("{name} must be a valid UUID"),
        )
    })
}

/// Parse a required `YYYY-MM-DD` date.
pub(crate) fn parse_date(value: Option<String>, field: FieldName) -> Result<NaiveDate, Error> {
    let raw = require(value, field)?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        let name = field.as_str();
        field_error(
            field,
            ErrorCode::InvalidDate,
            format!("{name} must be a date in YYYY-MM-DD form"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingId, text::limits};
    use rstest::rstest;

    const TITLE: FieldName = FieldName::new("title");

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a str> {
        error.details()?.get(key)?.as_str()
    }

    #[rstest]
    fn missing_values_name_the_field() {
        let error = required_text(None, TITLE, limits::LABEL).expect_err("missing");

        assert_eq!(detail(&error, "field"), Some("title"));
        assert_eq!(detail(&error, "code"), Some("missing_field"));
    }

    #[rstest]
    fn invalid_values_carry_the_reason() {
        let error = required_text(Some("x".repeat(limits::LABEL + 1)), TITLE, limits::LABEL)
            .expect_err("too long");

        assert_eq!(detail(&error, "code"), Some("invalid_value"));
        assert!(error.message().starts_with("title:"));
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   ".to_owned()))]
    fn blank_optional_text_is_absent(#[case] value: Option<String>) {
        assert_eq!(optional_text(value, TITLE, limits::LABEL).expect("ok"), None);
    }

    #[rstest]
    fn ids_report_invalid_uuid() {
        let error = parse_id::<BookingId>("lead-1", FieldName::new("id")).expect_err("bad id");

        assert_eq!(detail(&error, "code"), Some("invalid_uuid"));
    }

    #[rstest]
    #[case("2025-12-01", true)]
    #[case("01/12/2025", false)]
    #[case("2025-02-30", false)]
    fn dates_use_iso_format(#[case] raw: &str, #[case] valid: bool) {
        let result = parse_date(Some(raw.to_owned()), FieldName::new("eventDate"));

        assert_eq!(result.is_ok(), valid);
    }
}
