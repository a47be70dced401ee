//! Column mappers for date and time values

mod date;
mod duration;
mod instant;
mod time;
mod timestamp;

pub use date::DateColumnNaiveDateMapper;
pub use duration::{format_duration, parse_duration, VarcharColumnDurationMapper};
pub use instant::{BigIntColumnInstantMapper, TimestampTzColumnInstantMapper};
pub use time::TimeColumnNaiveTimeMapper;
pub use timestamp::{
    TimestampColumnInstantMapper, TimestampColumnNaiveDateTimeMapper,
    TimestampColumnZonedDateTimeMapper,
};

use chrono::{DateTime, SecondsFormat, Utc};
use usertype_core::UserTypeError;

/// Parses an RFC 3339 instant, normalising it to UTC
pub(crate) fn parse_instant(s: &str) -> Result<DateTime<Utc>, UserTypeError> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| UserTypeError::parse(s, "DateTime<Utc>", e))
}

pub(crate) fn format_instant(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
