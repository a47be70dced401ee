//! Date and Time User Types
//!
//! This crate persists `chrono` values through the user type extension points of
//! `usertype_core`:
//! - Calendar dates, times of day and local date-times
//! - Zoned date-times and UTC instants, stored relative to a configurable database zone
//! - Durations in their ISO-8601 string form
//!
//! Every user type here is a `ParameterizedUserType` over one column mapper. Zones
//! are taken from the `database_zone` and `application_zone` mapping parameters,
//! falling back to the global settings and finally to UTC.

pub mod columnmapper;
pub mod integrator;
pub mod zone;

use usertype_core::ParameterizedUserType;

use crate::columnmapper::{
    BigIntColumnInstantMapper, DateColumnNaiveDateMapper, TimeColumnNaiveTimeMapper,
    TimestampColumnInstantMapper, TimestampColumnNaiveDateTimeMapper,
    TimestampColumnZonedDateTimeMapper, TimestampTzColumnInstantMapper,
    VarcharColumnDurationMapper,
};

pub use integrator::register_user_types;
pub use zone::{DatabaseZone, TemporalError};

/// Persists a `NaiveDate` in a DATE column, stored using UTC unless a database zone is given
pub type PersistentNaiveDate = ParameterizedUserType<DateColumnNaiveDateMapper>;

/// Persists a `NaiveDateTime` in a TIMESTAMP column
pub type PersistentNaiveDateTime = ParameterizedUserType<TimestampColumnNaiveDateTimeMapper>;

/// Persists a `NaiveTime` in a TIME column
pub type PersistentNaiveTime = ParameterizedUserType<TimeColumnNaiveTimeMapper>;

/// Persists a `DateTime<Tz>` in a TIMESTAMP column
pub type PersistentZonedDateTime = ParameterizedUserType<TimestampColumnZonedDateTimeMapper>;

/// Persists a `DateTime<Utc>` in a TIMESTAMP column
pub type PersistentInstantAsTimestamp = ParameterizedUserType<TimestampColumnInstantMapper>;

/// Persists a `DateTime<Utc>` in a TIMESTAMPTZ column
pub type PersistentInstantAsTimestampTz = ParameterizedUserType<TimestampTzColumnInstantMapper>;

/// Persists a `DateTime<Utc>` as epoch milliseconds in a BIGINT column
pub type PersistentInstantAsMillis = ParameterizedUserType<BigIntColumnInstantMapper>;

/// Persists a `chrono::Duration` in a VARCHAR column
pub type PersistentDurationAsString = ParameterizedUserType<VarcharColumnDurationMapper>;
