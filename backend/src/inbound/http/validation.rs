//! Shared validation helpers for inbound HTTP adapters.
//!
//! Query and body fields that map to closed domain enumerations arrive as
//! strings and are parsed here so rejections surface as `invalid_request`
//! with field context, rather than as framework deserialization noise.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{Brand, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidBrand,
    InvalidStatus,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidBrand => "invalid_brand",
            ErrorCode::InvalidStatus => "invalid_status",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_brand(value: String, field: FieldName) -> Result<Brand, Error> {
    value.parse().map_err(|_| {
        field_error(
            field,
            format!("{} must be one of ANAIS, EVOLVE, POPULO", field.as_str()),
            ErrorCode::InvalidBrand,
            &value,
        )
    })
}

pub(crate) fn parse_optional_brand(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<Brand>, Error> {
    value.map(|raw| parse_brand(raw, field)).transpose()
}

pub(crate) fn parse_optional_status<S>(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<S>, Error>
where
    S: std::str::FromStr,
{
    value
        .map(|raw| {
            raw.parse().map_err(|_| {
                field_error(
                    field,
                    format!("{} is not a recognized status", field.as_str()),
                    ErrorCode::InvalidStatus,
                    &raw,
                )
            })
        })
        .transpose()
}

pub(crate) fn parse_rfc3339_timestamp(
    value: String,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            field_error(
                field,
                format!("{} must be an RFC 3339 timestamp", field.as_str()),
                ErrorCode::InvalidTimestamp,
                &value,
            )
        })
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| parse_rfc3339_timestamp(raw, field))
        .transpose()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn brand_parse_reports_the_field_and_value() {
        let err = parse_brand("ACME".to_owned(), FieldName::new("brand"))
            .expect_err("unknown brand rejected");
        let details = err.details.expect("details attached");
        assert_eq!(details["field"], "brand");
        assert_eq!(details["value"], "ACME");
        assert_eq!(details["code"], "invalid_brand");
    }

    #[rstest]
    fn optional_brand_passes_through_none() {
        let parsed = parse_optional_brand(None, FieldName::new("brand")).expect("none is fine");
        assert!(parsed.is_none());
    }

    #[rstest]
    fn status_parse_rejects_unknown_tokens() {
        use crate::domain::FulfilmentStatus;

        let err = parse_optional_status::<FulfilmentStatus>(
            Some("SHIPPED".to_owned()),
            FieldName::new("status"),
        )
        .expect_err("unknown status rejected");
        let details = err.details.expect("details attached");
        assert_eq!(details["code"], "invalid_status");
    }

    #[rstest]
    fn timestamp_parse_accepts_rfc3339() {
        let parsed = parse_rfc3339_timestamp(
            "2026-03-01T09:30:00Z".to_owned(),
            FieldName::new("scheduledAt"),
        )
        .expect("valid timestamp");
        assert_eq!(parsed.timezone(), Utc);
    }
}
