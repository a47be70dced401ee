//! Calendar dates in DATE columns

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use usertype_core::configuration::keys;
use usertype_core::{ColumnMapper, ColumnValue, Parameters, Settings, SqlType, UserTypeError};

use crate::zone::DatabaseZone;

/// Maps a `NaiveDate` to a DATE column
///
/// DATE values carry no zone, so the calendar date is stored unchanged in every
/// database zone. The configured zone is still validated and exposed through
/// [`DateColumnNaiveDateMapper::start_of_day`].
#[derive(Debug, Clone, Default)]
pub struct DateColumnNaiveDateMapper {
    database_zone: DatabaseZone,
}

impl DateColumnNaiveDateMapper {
    pub fn new(database_zone: DatabaseZone) -> Self {
        Self { database_zone }
    }

    pub fn database_zone(&self) -> DatabaseZone {
        self.database_zone
    }

    pub fn set_database_zone(&mut self, database_zone: DatabaseZone) {
        self.database_zone = database_zone;
    }

    /// Returns the instant at which `date` begins in the database zone
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        self.database_zone.start_of_day(date)
    }
}

impl ColumnMapper for DateColumnNaiveDateMapper {
    type Value = NaiveDate;

    fn sql_type(&self) -> SqlType {
        SqlType::Date
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<NaiveDate, UserTypeError> {
        value.into_date()
    }

    fn to_non_null_value(&self, value: &NaiveDate) -> Result<ColumnValue, UserTypeError> {
        Ok(ColumnValue::Date(*value))
    }

    fn from_non_null_string(&self, s: &str) -> Result<NaiveDate, UserTypeError> {
        NaiveDate::from_str(s.trim()).map_err(|e| UserTypeError::parse(s, "NaiveDate", e))
    }

    fn to_non_null_string(&self, value: &NaiveDate) -> String {
        value.format("%Y-%m-%d").to_string()
    }

    fn configure(&mut self, parameters: &Parameters, settings: &Settings) -> Result<(), UserTypeError> {
        if let Some(zone) = DatabaseZone::from_configuration(parameters, settings, keys::DATABASE_ZONE)? {
            self.database_zone = zone;
        }
        Ok(())
    }
}
