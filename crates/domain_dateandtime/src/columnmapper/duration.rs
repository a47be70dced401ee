//! Durations in VARCHAR columns, using the ISO-8601 time form

use chrono::Duration;
use usertype_core::{ColumnMapper, ColumnValue, SqlType, UserTypeError};

use crate::zone::TemporalError;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Maps a `chrono::Duration` to a VARCHAR column such as `PT72.345S`
#[derive(Debug, Clone, Copy, Default)]
pub struct VarcharColumnDurationMapper;

impl ColumnMapper for VarcharColumnDurationMapper {
    type Value = Duration;

    fn sql_type(&self) -> SqlType {
        SqlType::Varchar
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<Duration, UserTypeError> {
        Ok(parse_duration(&value.into_varchar()?)?)
    }

    fn to_non_null_value(&self, value: &Duration) -> Result<ColumnValue, UserTypeError> {
        Ok(ColumnValue::Varchar(format_duration(value)))
    }

    fn from_non_null_string(&self, s: &str) -> Result<Duration, UserTypeError> {
        Ok(parse_duration(s)?)
    }

    fn to_non_null_string(&self, value: &Duration) -> String {
        format_duration(value)
    }
}

/// Formats a duration as `PT<seconds>[.<fraction>]S`
///
/// Negative durations carry the sign on the seconds, e.g. `PT-1.5S`.
pub fn format_duration(value: &Duration) -> String {
    let negative = *value < Duration::zero();
    let magnitude = if negative { -*value } else { *value };

    let seconds = magnitude.num_seconds();
    let nanos = magnitude.subsec_nanos();

    let mut out = format!("PT{}{}", if negative { "-" } else { "" }, seconds);
    if nanos > 0 {
        let fraction = format!("{:09}", nanos);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out.push('S');
    out
}

/// Parses the ISO-8601 time-only duration form, e.g. `PT1H30M`, `PT-0.5S`
pub fn parse_duration(s: &str) -> Result<Duration, TemporalError> {
    let invalid = || TemporalError::InvalidDuration(s.to_string());

    let body = s
        .trim()
        .strip_prefix("PT")
        .or_else(|| s.trim().strip_prefix("pt"))
        .ok_or_else(invalid)?;
    if body.is_empty() {
        return Err(invalid());
    }

    let mut total = Duration::zero();
    let mut rest = body;
    while !rest.is_empty() {
        let unit_at = rest
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(invalid)?;
        let (number, tail) = rest.split_at(unit_at);
        let unit = tail.chars().next().ok_or_else(invalid)?;
        rest = &tail[unit.len_utf8()..];

        let component = match unit.to_ascii_uppercase() {
            'H' => whole_component(number, 3600).ok_or_else(invalid)?,
            'M' => whole_component(number, 60).ok_or_else(invalid)?,
            'S' if rest.is_empty() => seconds_component(number).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };
        total = total.checked_add(&component).ok_or_else(invalid)?;
    }
    Ok(total)
}

fn whole_component(number: &str, unit_seconds: i64) -> Option<Duration> {
    let count: i64 = number.parse().ok()?;
    Duration::try_seconds(count.checked_mul(unit_seconds)?)
}

fn seconds_component(number: &str) -> Option<Duration> {
    let (negative, digits) = match number.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, number),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() || fraction.len() > 9 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let seconds: i64 = whole.parse().ok()?;
    let nanos: i64 = if fraction.is_empty() {
        0
    } else {
        format!("{:0<9}", fraction).parse().ok()?
    };
    debug_assert!(nanos < NANOS_PER_SECOND);

    let magnitude = Duration::try_seconds(seconds)?.checked_add(&Duration::nanoseconds(nanos))?;
    Some(if negative { -magnitude } else { magnitude })
}
