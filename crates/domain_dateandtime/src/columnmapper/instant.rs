//! Instants in TIMESTAMPTZ and BIGINT columns

use chrono::{DateTime, Utc};
use usertype_core::{ColumnMapper, ColumnValue, SqlType, UserTypeError};

use crate::zone::TemporalError;

/// Maps a UTC instant to a TIMESTAMPTZ column unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampTzColumnInstantMapper;

impl ColumnMapper for TimestampTzColumnInstantMapper {
    type Value = DateTime<Utc>;

    fn sql_type(&self) -> SqlType {
        SqlType::TimestampTz
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<DateTime<Utc>, UserTypeError> {
        value.into_timestamp_tz()
    }

    fn to_non_null_value(&self, value: &DateTime<Utc>) -> Result<ColumnValue, UserTypeError> {
        Ok(ColumnValue::TimestampTz(*value))
    }

    fn from_non_null_string(&self, s: &str) -> Result<DateTime<Utc>, UserTypeError> {
        super::parse_instant(s)
    }

    fn to_non_null_string(&self, value: &DateTime<Utc>) -> String {
        super::format_instant(value)
    }
}

/// Maps a UTC instant to milliseconds since the epoch in a BIGINT column
///
/// Sub-millisecond precision is truncated on write.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigIntColumnInstantMapper;

impl ColumnMapper for BigIntColumnInstantMapper {
    type Value = DateTime<Utc>;

    fn sql_type(&self) -> SqlType {
        SqlType::BigInt
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<DateTime<Utc>, UserTypeError> {
        let millis = value.into_big_int()?;
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| TemporalError::OutOfRange(format!("{} ms since epoch", millis)).into())
    }

    fn to_non_null_value(&self, value: &DateTime<Utc>) -> Result<ColumnValue, UserTypeError> {
        Ok(ColumnValue::BigInt(value.timestamp_millis()))
    }

    fn from_non_null_string(&self, s: &str) -> Result<DateTime<Utc>, UserTypeError> {
        super::parse_instant(s)
    }

    fn to_non_null_string(&self, value: &DateTime<Utc>) -> String {
        super::format_instant(value)
    }
}
