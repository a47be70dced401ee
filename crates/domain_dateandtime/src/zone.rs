//! Zones used when date and time values cross the database boundary

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use usertype_core::{Parameters, Settings, UserTypeError};

/// Keyword selecting the zone of the running process
pub const LOCAL_ZONE: &str = "local";

/// Alternative keyword for [`LOCAL_ZONE`] accepted in existing mapping parameters
pub const JVM_ZONE: &str = "jvm";

/// Errors related to zone handling and temporal conversion
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Unknown time zone: {0}")]
    UnknownZone(String),

    #[error("Local time {local} does not exist in zone {zone}")]
    NonexistentLocalTime {
        local: NaiveDateTime,
        zone: String,
    },

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
}

impl From<TemporalError> for UserTypeError {
    fn from(error: TemporalError) -> Self {
        UserTypeError::domain(error)
    }
}

/// The zone in which stored date and time columns are interpreted
///
/// Either a named IANA zone or the local zone of the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseZone {
    Named(Tz),
    Local,
}

impl Default for DatabaseZone {
    fn default() -> Self {
        DatabaseZone::Named(chrono_tz::UTC)
    }
}

impl DatabaseZone {
    pub fn new(tz: Tz) -> Self {
        DatabaseZone::Named(tz)
    }

    /// Returns the UTC offset in force at the given instant
    pub fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            DatabaseZone::Named(tz) => instant.with_timezone(tz).offset().fix(),
            DatabaseZone::Local => instant.with_timezone(&Local).offset().fix(),
        }
    }

    /// Converts an instant to wall-clock time in this zone
    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            DatabaseZone::Named(tz) => instant.with_timezone(tz).naive_local(),
            DatabaseZone::Local => instant.with_timezone(&Local).naive_local(),
        }
    }

    /// Converts wall-clock time in this zone to an instant
    ///
    /// Ambiguous times resolve to the earlier instant. Times falling in a gap
    /// are rejected.
    pub fn from_local(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, TemporalError> {
        self.resolve(&local)
            .earliest()
            .ok_or_else(|| TemporalError::NonexistentLocalTime {
                local,
                zone: self.to_string(),
            })
    }

    /// Returns the first instant of the given day in this zone
    ///
    /// When midnight falls in a gap the day starts at the first valid quarter hour.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(chrono::NaiveTime::MIN);
        (0..=96)
            .map(|quarter| midnight + Duration::minutes(15 * quarter))
            .find_map(|local| self.resolve(&local).earliest())
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
    }

    /// Returns the calendar date of an instant in this zone
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.to_local(instant).date()
    }

    fn resolve(&self, local: &NaiveDateTime) -> LocalResult<DateTime<Utc>> {
        match self {
            DatabaseZone::Named(tz) => tz
                .from_local_datetime(local)
                .map(|dt| dt.with_timezone(&Utc)),
            DatabaseZone::Local => Local
                .from_local_datetime(local)
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Resolves a zone parameter from the mapping parameters or the global settings
    pub fn from_configuration(
        parameters: &Parameters,
        settings: &Settings,
        key: &str,
    ) -> Result<Option<Self>, UserTypeError> {
        settings
            .resolve(parameters, key)
            .map(|value| {
                value
                    .parse::<DatabaseZone>()
                    .map_err(|e| UserTypeError::invalid_parameter(key, value, e))
            })
            .transpose()
    }
}

impl FromStr for DatabaseZone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(LOCAL_ZONE) || s.eq_ignore_ascii_case(JVM_ZONE) {
            return Ok(DatabaseZone::Local);
        }
        Tz::from_str(s)
            .map(DatabaseZone::Named)
            .map_err(|_| TemporalError::UnknownZone(s.to_string()))
    }
}

impl fmt::Display for DatabaseZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseZone::Named(tz) => f.write_str(tz.name()),
            DatabaseZone::Local => f.write_str(LOCAL_ZONE),
        }
    }
}

impl Serialize for DatabaseZone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DatabaseZone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Resolves a zone that must be a named IANA zone
pub(crate) fn named_zone_from_configuration(
    parameters: &Parameters,
    settings: &Settings,
    key: &str,
) -> Result<Option<Tz>, UserTypeError> {
    match DatabaseZone::from_configuration(parameters, settings, key)? {
        Some(DatabaseZone::Named(tz)) => Ok(Some(tz)),
        Some(DatabaseZone::Local) => Err(UserTypeError::invalid_parameter(
            key,
            LOCAL_ZONE,
            "a named time zone is required",
        )),
        None => Ok(None),
    }
}
