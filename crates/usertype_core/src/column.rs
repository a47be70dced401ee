//! Column values exchanged with the database driver
//!
//! A `ColumnValue` is the primitive, non-null form of a single column. Nullability
//! is expressed with `Option<ColumnValue>` at the reader and writer seams so that
//! every user type handles NULL in exactly one place.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::UserTypeError;

/// The primitive column kinds a user type can read and write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Integer,
    BigInt,
    Numeric,
    Varchar,
}

impl SqlType {
    /// Returns the SQL name of this column kind
    pub fn name(&self) -> &'static str {
        match self {
            SqlType::Date => "DATE",
            SqlType::Time => "TIME",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::TimestampTz => "TIMESTAMPTZ",
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Numeric => "NUMERIC",
            SqlType::Varchar => "VARCHAR",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A non-null primitive column value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ColumnValue {
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Integer(i32),
    BigInt(i64),
    Numeric(Decimal),
    Varchar(String),
}

macro_rules! column_accessor {
    ($method:ident, $variant:ident, $ty:ty) => {
        /// Unwraps the value, failing if the column holds another kind
        pub fn $method(self) -> Result<$ty, UserTypeError> {
            match self {
                ColumnValue::$variant(value) => Ok(value),
                other => Err(UserTypeError::UnexpectedColumnType {
                    expected: SqlType::$variant,
                    actual: other.sql_type(),
                }),
            }
        }
    };
}

impl ColumnValue {
    /// Returns the column kind of this value
    pub fn sql_type(&self) -> SqlType {
        match self {
            ColumnValue::Date(_) => SqlType::Date,
            ColumnValue::Time(_) => SqlType::Time,
            ColumnValue::Timestamp(_) => SqlType::Timestamp,
            ColumnValue::TimestampTz(_) => SqlType::TimestampTz,
            ColumnValue::Integer(_) => SqlType::Integer,
            ColumnValue::BigInt(_) => SqlType::BigInt,
            ColumnValue::Numeric(_) => SqlType::Numeric,
            ColumnValue::Varchar(_) => SqlType::Varchar,
        }
    }

    column_accessor!(into_date, Date, NaiveDate);
    column_accessor!(into_time, Time, NaiveTime);
    column_accessor!(into_timestamp, Timestamp, NaiveDateTime);
    column_accessor!(into_timestamp_tz, TimestampTz, DateTime<Utc>);
    column_accessor!(into_integer, Integer, i32);
    column_accessor!(into_big_int, BigInt, i64);
    column_accessor!(into_numeric, Numeric, Decimal);
    column_accessor!(into_varchar, Varchar, String);

    /// Fails unless this value is of the given kind
    pub fn ensure_type(&self, expected: SqlType) -> Result<(), UserTypeError> {
        let actual = self.sql_type();
        if actual != expected {
            return Err(UserTypeError::UnexpectedColumnType { expected, actual });
        }
        Ok(())
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Date(v) => write!(f, "{}", v),
            ColumnValue::Time(v) => write!(f, "{}", v),
            ColumnValue::Timestamp(v) => write!(f, "{}", v),
            ColumnValue::TimestampTz(v) => write!(f, "{}", v.to_rfc3339()),
            ColumnValue::Integer(v) => write!(f, "{}", v),
            ColumnValue::BigInt(v) => write!(f, "{}", v),
            ColumnValue::Numeric(v) => write!(f, "{}", v),
            ColumnValue::Varchar(v) => write!(f, "'{}'", v),
        }
    }
}

/// A source of named, nullable column values (a result set row)
pub trait ColumnReader {
    /// Reads the named column, returning `None` when it holds NULL
    fn read(&self, name: &str, sql_type: SqlType) -> Result<Option<ColumnValue>, UserTypeError>;
}

/// A sink of positional, nullable column values (prepared statement parameters)
pub trait ColumnWriter {
    /// Writes the parameter at `index`; `None` writes a NULL of `sql_type`
    fn write(
        &mut self,
        index: usize,
        value: Option<ColumnValue>,
        sql_type: SqlType,
    ) -> Result<(), UserTypeError>;
}

/// In-memory result row keyed by column name
///
/// Column names are matched case-insensitively, as SQL identifiers are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowValues {
    columns: HashMap<String, Option<ColumnValue>>,
}

impl RowValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column value, returning the row for chaining
    pub fn with(mut self, name: &str, value: Option<ColumnValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: Option<ColumnValue>) {
        self.columns.insert(name.to_ascii_lowercase(), value);
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl ColumnReader for RowValues {
    fn read(&self, name: &str, sql_type: SqlType) -> Result<Option<ColumnValue>, UserTypeError> {
        let value = self
            .columns
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| UserTypeError::MissingColumn(name.to_string()))?;

        if let Some(value) = value {
            value.ensure_type(sql_type)?;
        }
        Ok(value.clone())
    }
}

/// In-memory statement parameters keyed by position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterValues {
    parameters: BTreeMap<usize, (SqlType, Option<ColumnValue>)>,
}

impl ParameterValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value written at `index`; the outer `None` means nothing was written
    pub fn get(&self, index: usize) -> Option<&Option<ColumnValue>> {
        self.parameters.get(&index).map(|(_, value)| value)
    }

    /// Returns the declared column kind of the parameter at `index`
    pub fn sql_type(&self, index: usize) -> Option<SqlType> {
        self.parameters.get(&index).map(|(sql_type, _)| *sql_type)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Consumes the parameters in index order
    pub fn into_vec(self) -> Vec<(SqlType, Option<ColumnValue>)> {
        self.parameters.into_values().collect()
    }

    /// Consumes the parameters in index order, dropping the declared kinds
    pub fn into_values(self) -> Vec<Option<ColumnValue>> {
        self.parameters.into_values().map(|(_, value)| value).collect()
    }
}

impl ColumnWriter for ParameterValues {
    fn write(
        &mut self,
        index: usize,
        value: Option<ColumnValue>,
        sql_type: SqlType,
    ) -> Result<(), UserTypeError> {
        if let Some(value) = &value {
            value.ensure_type(sql_type)?;
        }
        self.parameters.insert(index, (sql_type, value));
        Ok(())
    }
}
