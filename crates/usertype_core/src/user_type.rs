//! The user type extension point
//!
//! A persistence layer calls a `UserType` whenever it needs to read a domain value
//! from a result row or bind one to a statement. Values handled here are immutable,
//! so copying is a clone and the cached form is simply the column tuple.

use std::fmt;

use tracing::debug;

use crate::column::{ColumnReader, ColumnValue, ColumnWriter, ParameterValues, RowValues, SqlType};
use crate::configuration::{Parameters, Settings};
use crate::error::UserTypeError;
use crate::mapper::ColumnMapper;

/// Defines how a domain type is mapped to and from database columns
pub trait UserType: Send + Sync {
    /// The domain type handled by this user type
    type Value: Clone + PartialEq + fmt::Debug + Send + Sync;

    /// Name of the domain type
    fn returned_type(&self) -> &'static str;

    /// Column kinds, one per physical column
    fn sql_types(&self) -> Vec<SqlType>;

    /// Names of the decomposed properties; empty for single-column types
    fn property_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn is_mutable(&self) -> bool {
        false
    }

    fn deep_copy(&self, value: &Self::Value) -> Self::Value {
        value.clone()
    }

    fn equals(&self, x: Option<&Self::Value>, y: Option<&Self::Value>) -> bool {
        x == y
    }

    /// Reads the value from the named columns of a row
    fn null_safe_get(
        &self,
        reader: &dyn ColumnReader,
        names: &[&str],
    ) -> Result<Option<Self::Value>, UserTypeError>;

    /// Binds the value to consecutive parameters starting at `index`
    fn null_safe_set(
        &self,
        writer: &mut dyn ColumnWriter,
        value: Option<&Self::Value>,
        index: usize,
    ) -> Result<(), UserTypeError>;

    /// Parses the string form of the value
    fn parse_value(&self, s: &str) -> Result<Self::Value, UserTypeError>;

    /// Formats the value as a string
    fn format_value(&self, value: &Self::Value) -> String;

    /// Produces the cacheable form of a value
    fn disassemble(
        &self,
        value: Option<&Self::Value>,
    ) -> Result<Vec<Option<ColumnValue>>, UserTypeError> {
        let mut parameters = ParameterValues::new();
        self.null_safe_set(&mut parameters, value, 0)?;
        Ok(parameters.into_values())
    }

    /// Rebuilds a value from its cached form
    fn assemble(
        &self,
        cached: Vec<Option<ColumnValue>>,
    ) -> Result<Option<Self::Value>, UserTypeError> {
        let expected = self.sql_types().len();
        if cached.len() != expected {
            return Err(UserTypeError::ColumnCount {
                expected,
                actual: cached.len(),
            });
        }

        let names: Vec<String> = (0..expected).map(|i| format!("c{}", i)).collect();
        let row = names
            .iter()
            .zip(cached)
            .fold(RowValues::new(), |row, (name, value)| row.with(name, value));
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        self.null_safe_get(&row, &names)
    }
}

/// A user type that accepts mapping parameters and global settings
pub trait Configurable {
    /// Stores the parameters supplied by the mapping
    fn set_parameter_values(&mut self, parameters: Parameters);

    /// Applies the stored parameters together with the global settings
    fn apply_configuration(&mut self, settings: &Settings) -> Result<(), UserTypeError>;

    /// Sets parameters and applies configuration in one step
    fn configured(mut self, parameters: Parameters, settings: &Settings) -> Result<Self, UserTypeError>
    where
        Self: Sized,
    {
        self.set_parameter_values(parameters);
        self.apply_configuration(settings)?;
        Ok(self)
    }
}

/// A single-column user type backed by a column mapper
#[derive(Debug, Clone, Default)]
pub struct ParameterizedUserType<C> {
    mapper: C,
    parameters: Parameters,
}

impl<C: ColumnMapper> ParameterizedUserType<C> {
    pub fn new(mapper: C) -> Self {
        Self {
            mapper,
            parameters: Parameters::new(),
        }
    }

    pub fn mapper(&self) -> &C {
        &self.mapper
    }

    pub fn parameter_values(&self) -> &Parameters {
        &self.parameters
    }
}

impl<C: ColumnMapper> Configurable for ParameterizedUserType<C> {
    fn set_parameter_values(&mut self, parameters: Parameters) {
        self.parameters = parameters;
    }

    fn apply_configuration(&mut self, settings: &Settings) -> Result<(), UserTypeError> {
        self.mapper.configure(&self.parameters, settings)?;
        debug!(
            returned_type = self.mapper.returned_type(),
            parameters = self.parameters.iter().count(),
            "Applied user type configuration"
        );
        Ok(())
    }
}

impl<C: ColumnMapper> UserType for ParameterizedUserType<C> {
    type Value = C::Value;

    fn returned_type(&self) -> &'static str {
        self.mapper.returned_type()
    }

    fn sql_types(&self) -> Vec<SqlType> {
        vec![self.mapper.sql_type()]
    }

    fn null_safe_get(
        &self,
        reader: &dyn ColumnReader,
        names: &[&str],
    ) -> Result<Option<Self::Value>, UserTypeError> {
        match names {
            [name] => self.mapper.read(reader, name),
            _ => Err(UserTypeError::ColumnCount {
                expected: 1,
                actual: names.len(),
            }),
        }
    }

    fn null_safe_set(
        &self,
        writer: &mut dyn ColumnWriter,
        value: Option<&Self::Value>,
        index: usize,
    ) -> Result<(), UserTypeError> {
        self.mapper.write(writer, value, index)
    }

    fn parse_value(&self, s: &str) -> Result<Self::Value, UserTypeError> {
        self.mapper.from_non_null_string(s)
    }

    fn format_value(&self, value: &Self::Value) -> String {
        self.mapper.to_non_null_string(value)
    }
}
