//! Times of day in TIME columns

use std::str::FromStr;

use chrono::NaiveTime;
use usertype_core::{ColumnMapper, ColumnValue, SqlType, UserTypeError};

/// Maps a `NaiveTime` to a TIME column unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeColumnNaiveTimeMapper;

impl ColumnMapper for TimeColumnNaiveTimeMapper {
    type Value = NaiveTime;

    fn sql_type(&self) -> SqlType {
        SqlType::Time
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<NaiveTime, UserTypeError> {
        value.into_time()
    }

    fn to_non_null_value(&self, value: &NaiveTime) -> Result<ColumnValue, UserTypeError> {
        Ok(ColumnValue::Time(*value))
    }

    fn from_non_null_string(&self, s: &str) -> Result<NaiveTime, UserTypeError> {
        NaiveTime::from_str(s.trim()).map_err(|e| UserTypeError::parse(s, "NaiveTime", e))
    }

    fn to_non_null_string(&self, value: &NaiveTime) -> String {
        value.format("%H:%M:%S%.f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_form_keeps_fraction() {
        let mapper = TimeColumnNaiveTimeMapper;
        let value = NaiveTime::from_hms_milli_opt(23, 59, 1, 250).unwrap();

        let text = mapper.to_non_null_string(&value);
        assert_eq!(text, "23:59:01.250");
        assert_eq!(mapper.from_non_null_string(&text).unwrap(), value);
    }

    #[test]
    fn test_column_value() {
        let mapper = TimeColumnNaiveTimeMapper;
        let value = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert_eq!(mapper.to_non_null_value(&value).unwrap(), ColumnValue::Time(value));
        assert_eq!(mapper.from_non_null_value(ColumnValue::Time(value)).unwrap(), value);
    }
}
