//! Column mappers
//!
//! A column mapper converts one domain value to and from one primitive column.
//! User types are assembled from one or more mappers.

use std::fmt;

use crate::column::{ColumnReader, ColumnValue, ColumnWriter, SqlType};
use crate::configuration::{Parameters, Settings};
use crate::error::UserTypeError;

/// Converts a single value between its domain type and a column value
pub trait ColumnMapper: Send + Sync {
    /// The domain type produced by this mapper
    type Value: Clone + PartialEq + fmt::Debug + Send + Sync;

    /// The column kind this mapper reads and writes
    fn sql_type(&self) -> SqlType;

    /// Name of the domain type, for diagnostics
    fn returned_type(&self) -> &'static str {
        std::any::type_name::<Self::Value>()
    }

    /// Converts a non-null column value to the domain value
    fn from_non_null_value(&self, value: ColumnValue) -> Result<Self::Value, UserTypeError>;

    /// Converts the domain value to its column value
    fn to_non_null_value(&self, value: &Self::Value) -> Result<ColumnValue, UserTypeError>;

    /// Parses the string form of the domain value
    fn from_non_null_string(&self, s: &str) -> Result<Self::Value, UserTypeError>;

    /// Formats the domain value as a string
    fn to_non_null_string(&self, value: &Self::Value) -> String;

    /// Applies mapping parameters and global settings
    fn configure(
        &mut self,
        _parameters: &Parameters,
        _settings: &Settings,
    ) -> Result<(), UserTypeError> {
        Ok(())
    }

    /// Reads and converts the named column, mapping NULL to `None`
    fn read(
        &self,
        reader: &dyn ColumnReader,
        name: &str,
    ) -> Result<Option<Self::Value>, UserTypeError> {
        match reader.read(name, self.sql_type())? {
            Some(value) => {
                value.ensure_type(self.sql_type())?;
                self.from_non_null_value(value).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Converts and writes the value at `index`, writing a typed NULL for `None`
    fn write(
        &self,
        writer: &mut dyn ColumnWriter,
        value: Option<&Self::Value>,
        index: usize,
    ) -> Result<(), UserTypeError> {
        let column = value.map(|v| self.to_non_null_value(v)).transpose()?;
        writer.write(index, column, self.sql_type())
    }
}
