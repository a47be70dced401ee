//! Multi-column user types
//!
//! Some domain values decompose into more than one physical column, for example a
//! currency and an amount. A `MultiColumnMapping` names the two column mappers and
//! how the value is split into and rebuilt from their converted values.

use std::fmt;

use tracing::debug;

use crate::column::{ColumnReader, ColumnWriter, SqlType};
use crate::configuration::{Parameters, Settings};
use crate::error::UserTypeError;
use crate::mapper::ColumnMapper;
use crate::user_type::{Configurable, UserType};

/// Decomposition of a domain value into two mapped columns
pub trait MultiColumnMapping: Send + Sync {
    type Value: Clone + PartialEq + fmt::Debug + Send + Sync;
    type First: ColumnMapper;
    type Second: ColumnMapper;

    /// Property names of the two columns, in column order
    fn property_names(&self) -> &'static [&'static str];

    fn first(&self) -> &Self::First;

    fn second(&self) -> &Self::Second;

    /// Builds the domain value from the converted column values
    fn from_converted_columns(
        &self,
        first: <Self::First as ColumnMapper>::Value,
        second: <Self::Second as ColumnMapper>::Value,
    ) -> Result<Self::Value, UserTypeError>;

    /// Splits the domain value into the converted column values
    fn to_converted_columns(
        &self,
        value: &Self::Value,
    ) -> Result<
        (
            <Self::First as ColumnMapper>::Value,
            <Self::Second as ColumnMapper>::Value,
        ),
        UserTypeError,
    >;

    fn parse(&self, s: &str) -> Result<Self::Value, UserTypeError>;

    fn format(&self, value: &Self::Value) -> String;

    fn configure(
        &mut self,
        _parameters: &Parameters,
        _settings: &Settings,
    ) -> Result<(), UserTypeError> {
        Ok(())
    }
}

/// A user type spanning the two columns of a `MultiColumnMapping`
#[derive(Debug, Clone, Default)]
pub struct MultiColumnUserType<M> {
    mapping: M,
    parameters: Parameters,
}

impl<M: MultiColumnMapping> MultiColumnUserType<M> {
    pub fn new(mapping: M) -> Self {
        Self {
            mapping,
            parameters: Parameters::new(),
        }
    }

    pub fn mapping(&self) -> &M {
        &self.mapping
    }
}

impl<M: MultiColumnMapping> Configurable for MultiColumnUserType<M> {
    fn set_parameter_values(&mut self, parameters: Parameters) {
        self.parameters = parameters;
    }

    fn apply_configuration(&mut self, settings: &Settings) -> Result<(), UserTypeError> {
        self.mapping.configure(&self.parameters, settings)?;
        debug!(
            returned_type = std::any::type_name::<M::Value>(),
            "Applied multi-column user type configuration"
        );
        Ok(())
    }
}

impl<M: MultiColumnMapping> UserType for MultiColumnUserType<M> {
    type Value = M::Value;

    fn returned_type(&self) -> &'static str {
        std::any::type_name::<M::Value>()
    }

    fn sql_types(&self) -> Vec<SqlType> {
        vec![self.mapping.first().sql_type(), self.mapping.second().sql_type()]
    }

    fn property_names(&self) -> &'static [&'static str] {
        self.mapping.property_names()
    }

    /// Yields `None` when either column is NULL
    fn null_safe_get(
        &self,
        reader: &dyn ColumnReader,
        names: &[&str],
    ) -> Result<Option<Self::Value>, UserTypeError> {
        let [first_name, second_name] = names else {
            return Err(UserTypeError::ColumnCount {
                expected: 2,
                actual: names.len(),
            });
        };

        let first = self.mapping.first().read(reader, first_name)?;
        let second = self.mapping.second().read(reader, second_name)?;

        match (first, second) {
            (Some(first), Some(second)) => {
                self.mapping.from_converted_columns(first, second).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn null_safe_set(
        &self,
        writer: &mut dyn ColumnWriter,
        value: Option<&Self::Value>,
        index: usize,
    ) -> Result<(), UserTypeError> {
        match value {
            Some(value) => {
                let (first, second) = self.mapping.to_converted_columns(value)?;
                self.mapping.first().write(writer, Some(&first), index)?;
                self.mapping.second().write(writer, Some(&second), index + 1)
            }
            None => {
                self.mapping.first().write(writer, None, index)?;
                self.mapping.second().write(writer, None, index + 1)
            }
        }
    }

    fn parse_value(&self, s: &str) -> Result<Self::Value, UserTypeError> {
        self.mapping.parse(s)
    }

    fn format_value(&self, value: &Self::Value) -> String {
        self.mapping.format(value)
    }
}
