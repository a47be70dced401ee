//! Date-times in TIMESTAMP (without time zone) columns
//!
//! A TIMESTAMP column holds wall-clock time. Zoned values and instants are
//! stored as the wall-clock time of the database zone.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use usertype_core::configuration::keys;
use usertype_core::{ColumnMapper, ColumnValue, Parameters, Settings, SqlType, UserTypeError};

use crate::zone::{named_zone_from_configuration, DatabaseZone};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Maps a `NaiveDateTime` to a TIMESTAMP column unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampColumnNaiveDateTimeMapper;

impl ColumnMapper for TimestampColumnNaiveDateTimeMapper {
    type Value = NaiveDateTime;

    fn sql_type(&self) -> SqlType {
        SqlType::Timestamp
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<NaiveDateTime, UserTypeError> {
        value.into_timestamp()
    }

    fn to_non_null_value(&self, value: &NaiveDateTime) -> Result<ColumnValue, UserTypeError> {
        Ok(ColumnValue::Timestamp(*value))
    }

    fn from_non_null_string(&self, s: &str) -> Result<NaiveDateTime, UserTypeError> {
        NaiveDateTime::from_str(s.trim()).map_err(|e| UserTypeError::parse(s, "NaiveDateTime", e))
    }

    fn to_non_null_string(&self, value: &NaiveDateTime) -> String {
        value.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Maps a zoned `DateTime<Tz>` to a TIMESTAMP column
///
/// Values are written as wall-clock time in the database zone and read back in
/// the application zone (UTC unless configured).
#[derive(Debug, Clone)]
pub struct TimestampColumnZonedDateTimeMapper {
    database_zone: DatabaseZone,
    application_zone: Tz,
}

impl Default for TimestampColumnZonedDateTimeMapper {
    fn default() -> Self {
        Self {
            database_zone: DatabaseZone::default(),
            application_zone: chrono_tz::UTC,
        }
    }
}

impl TimestampColumnZonedDateTimeMapper {
    pub fn new(database_zone: DatabaseZone, application_zone: Tz) -> Self {
        Self {
            database_zone,
            application_zone,
        }
    }

    pub fn database_zone(&self) -> DatabaseZone {
        self.database_zone
    }

    pub fn application_zone(&self) -> Tz {
        self.application_zone
    }
}

impl ColumnMapper for TimestampColumnZonedDateTimeMapper {
    type Value = DateTime<Tz>;

    fn sql_type(&self) -> SqlType {
        SqlType::Timestamp
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<DateTime<Tz>, UserTypeError> {
        let instant = self.database_zone.from_local(value.into_timestamp()?)?;
        Ok(instant.with_timezone(&self.application_zone))
    }

    fn to_non_null_value(&self, value: &DateTime<Tz>) -> Result<ColumnValue, UserTypeError> {
        let local = self.database_zone.to_local(value.with_timezone(&Utc));
        Ok(ColumnValue::Timestamp(local))
    }

    fn from_non_null_string(&self, s: &str) -> Result<DateTime<Tz>, UserTypeError> {
        DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&self.application_zone))
            .map_err(|e| UserTypeError::parse(s, "DateTime<Tz>", e))
    }

    fn to_non_null_string(&self, value: &DateTime<Tz>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }

    fn configure(&mut self, parameters: &Parameters, settings: &Settings) -> Result<(), UserTypeError> {
        if let Some(zone) = DatabaseZone::from_configuration(parameters, settings, keys::DATABASE_ZONE)? {
            self.database_zone = zone;
        }
        if let Some(zone) = named_zone_from_configuration(parameters, settings, keys::APPLICATION_ZONE)? {
            self.application_zone = zone;
        }
        Ok(())
    }
}

/// Maps a UTC instant to a TIMESTAMP column holding database zone wall-clock time
#[derive(Debug, Clone, Default)]
pub struct TimestampColumnInstantMapper {
    database_zone: DatabaseZone,
}

impl TimestampColumnInstantMapper {
    pub fn new(database_zone: DatabaseZone) -> Self {
        Self { database_zone }
    }

    pub fn database_zone(&self) -> DatabaseZone {
        self.database_zone
    }
}

impl ColumnMapper for TimestampColumnInstantMapper {
    type Value = DateTime<Utc>;

    fn sql_type(&self) -> SqlType {
        SqlType::Timestamp
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<DateTime<Utc>, UserTypeError> {
        Ok(self.database_zone.from_local(value.into_timestamp()?)?)
    }

    fn to_non_null_value(&self, value: &DateTime<Utc>) -> Result<ColumnValue, UserTypeError> {
        Ok(ColumnValue::Timestamp(self.database_zone.to_local(*value)))
    }

    fn from_non_null_string(&self, s: &str) -> Result<DateTime<Utc>, UserTypeError> {
        super::parse_instant(s)
    }

    fn to_non_null_string(&self, value: &DateTime<Utc>) -> String {
        super::format_instant(value)
    }

    fn configure(&mut self, parameters: &Parameters, settings: &Settings) -> Result<(), UserTypeError> {
        if let Some(zone) = DatabaseZone::from_configuration(parameters, settings, keys::DATABASE_ZONE)? {
            self.database_zone = zone;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn wall(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_naive_date_time_unchanged() {
        let mapper = TimestampColumnNaiveDateTimeMapper;
        let value = wall(2024, 5, 6, 7, 8);

        let column = mapper.to_non_null_value(&value).unwrap();
        assert_eq!(column, ColumnValue::Timestamp(value));
        assert_eq!(mapper.from_non_null_value(column).unwrap(), value);
    }

    #[test]
    fn test_naive_date_time_string_form() {
        let mapper = TimestampColumnNaiveDateTimeMapper;
        let value = wall(2024, 5, 6, 7, 8);

        let text = mapper.to_non_null_string(&value);
        assert_eq!(text, "2024-05-06T07:08:00");
        assert_eq!(mapper.from_non_null_string(&text).unwrap(), value);
    }

    #[test]
    fn test_zoned_value_written_in_database_zone() {
        let mapper = TimestampColumnZonedDateTimeMapper::new(
            DatabaseZone::new(chrono_tz::Europe::Berlin),
            chrono_tz::Asia::Tokyo,
        );
        let value = chrono_tz::America::New_York
            .with_ymd_and_hms(2024, 1, 15, 9, 0, 0)
            .unwrap();

        let column = mapper.to_non_null_value(&value).unwrap();
        assert_eq!(column, ColumnValue::Timestamp(wall(2024, 1, 15, 15, 0)));

        let back = mapper.from_non_null_value(column).unwrap();
        assert_eq!(back, value);
        assert_eq!(back.timezone(), chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn test_zoned_value_in_gap_is_rejected() {
        let mapper = TimestampColumnZonedDateTimeMapper::new(
            DatabaseZone::new(chrono_tz::Europe::London),
            chrono_tz::UTC,
        );
        let result = mapper.from_non_null_value(ColumnValue::Timestamp(wall(2024, 3, 31, 1, 30)));
        assert!(matches!(result, Err(UserTypeError::Domain(_))));
    }

    #[test]
    fn test_zoned_configuration() {
        let mut mapper = TimestampColumnZonedDateTimeMapper::default();
        let parameters = Parameters::new()
            .with(keys::DATABASE_ZONE, "Europe/Madrid")
            .with(keys::APPLICATION_ZONE, "America/Chicago");
        mapper.configure(&parameters, &Settings::default()).unwrap();

        assert_eq!(mapper.database_zone(), DatabaseZone::new(chrono_tz::Europe::Madrid));
        assert_eq!(mapper.application_zone(), chrono_tz::America::Chicago);
    }

    #[test]
    fn test_instant_as_database_wall_time() {
        let mapper = TimestampColumnInstantMapper::new(DatabaseZone::new(chrono_tz::Asia::Kolkata));
        let instant = Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap();

        let column = mapper.to_non_null_value(&instant).unwrap();
        assert_eq!(column, ColumnValue::Timestamp(wall(2024, 8, 1, 5, 30)));
        assert_eq!(mapper.from_non_null_value(column).unwrap(), instant);
    }
}
