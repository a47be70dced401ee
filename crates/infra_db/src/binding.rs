//! Bridges between user types and SQLx
//!
//! `PgColumnWriter` collects the parameters a user type writes and binds them onto
//! a `sqlx::query`. `PgRowReader` exposes a fetched `PgRow` as a `ColumnReader`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};
use usertype_core::{
    ColumnReader, ColumnValue, ColumnWriter, ParameterValues, SqlType, UserTypeError,
};

use crate::error::DatabaseError;

/// A query with positional PostgreSQL arguments
pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Collects statement parameters written through the `ColumnWriter` interface
///
/// Index 0 is bound to `$1`. NULLs keep the declared column kind so that
/// PostgreSQL receives a typed NULL.
#[derive(Debug, Clone, Default)]
pub struct PgColumnWriter {
    parameters: ParameterValues,
}

impl PgColumnWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Binds every collected parameter onto `query` in index order
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::MissingParameter` if the written indexes are not
    /// consecutive from zero.
    pub fn bind_all<'q>(self, query: PgQuery<'q>) -> Result<PgQuery<'q>, DatabaseError> {
        if let Some(gap) = (0..self.parameters.len()).find(|i| self.parameters.get(*i).is_none()) {
            return Err(DatabaseError::MissingParameter(gap));
        }

        Ok(self
            .parameters
            .into_vec()
            .into_iter()
            .fold(query, |query, (sql_type, value)| bind_column(query, sql_type, value)))
    }
}

impl ColumnWriter for PgColumnWriter {
    fn write(
        &mut self,
        index: usize,
        value: Option<ColumnValue>,
        sql_type: SqlType,
    ) -> Result<(), UserTypeError> {
        self.parameters.write(index, value, sql_type)
    }
}

fn bind_column(query: PgQuery<'_>, sql_type: SqlType, value: Option<ColumnValue>) -> PgQuery<'_> {
    match value {
        Some(ColumnValue::Date(v)) => query.bind(v),
        Some(ColumnValue::Time(v)) => query.bind(v),
        Some(ColumnValue::Timestamp(v)) => query.bind(v),
        Some(ColumnValue::TimestampTz(v)) => query.bind(v),
        Some(ColumnValue::Integer(v)) => query.bind(v),
        Some(ColumnValue::BigInt(v)) => query.bind(v),
        Some(ColumnValue::Numeric(v)) => query.bind(v),
        Some(ColumnValue::Varchar(v)) => query.bind(v),
        None => match sql_type {
            SqlType::Date => query.bind(None::<NaiveDate>),
            SqlType::Time => query.bind(None::<NaiveTime>),
            SqlType::Timestamp => query.bind(None::<NaiveDateTime>),
            SqlType::TimestampTz => query.bind(None::<DateTime<Utc>>),
            SqlType::Integer => query.bind(None::<i32>),
            SqlType::BigInt => query.bind(None::<i64>),
            SqlType::Numeric => query.bind(None::<Decimal>),
            SqlType::Varchar => query.bind(None::<String>),
        },
    }
}

/// Reads named columns of a fetched row
#[derive(Debug, Clone, Copy)]
pub struct PgRowReader<'r> {
    row: &'r PgRow,
}

impl<'r> PgRowReader<'r> {
    pub fn new(row: &'r PgRow) -> Self {
        Self { row }
    }

    fn decode<T>(&self, name: &str) -> Result<Option<T>, UserTypeError>
    where
        T: for<'a> sqlx::Decode<'a, Postgres> + sqlx::Type<Postgres>,
    {
        self.row
            .try_get::<Option<T>, _>(name)
            .map_err(|e| match e {
                sqlx::Error::ColumnNotFound(_) => UserTypeError::MissingColumn(name.to_string()),
                other => UserTypeError::conversion(std::any::type_name::<T>(), other.to_string()),
            })
    }
}

impl ColumnReader for PgRowReader<'_> {
    fn read(&self, name: &str, sql_type: SqlType) -> Result<Option<ColumnValue>, UserTypeError> {
        Ok(match sql_type {
            SqlType::Date => self.decode::<NaiveDate>(name)?.map(ColumnValue::Date),
            SqlType::Time => self.decode::<NaiveTime>(name)?.map(ColumnValue::Time),
            SqlType::Timestamp => self.decode::<NaiveDateTime>(name)?.map(ColumnValue::Timestamp),
            SqlType::TimestampTz => self.decode::<DateTime<Utc>>(name)?.map(ColumnValue::TimestampTz),
            SqlType::Integer => self.decode::<i32>(name)?.map(ColumnValue::Integer),
            SqlType::BigInt => self.decode::<i64>(name)?.map(ColumnValue::BigInt),
            SqlType::Numeric => self.decode::<Decimal>(name)?.map(ColumnValue::Numeric),
            SqlType::Varchar => self.decode::<String>(name)?.map(ColumnValue::Varchar),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_collects_typed_parameters() {
        let mut writer = PgColumnWriter::new();
        writer
            .write(0, Some(ColumnValue::Varchar("key".into())), SqlType::Varchar)
            .unwrap();
        writer.write(1, None, SqlType::Numeric).unwrap();

        assert_eq!(writer.len(), 2);
        assert!(writer.bind_all(sqlx::query("SELECT $1, $2")).is_ok());
    }

    #[test]
    fn test_writer_rejects_mismatched_value() {
        let mut writer = PgColumnWriter::new();
        let result = writer.write(0, Some(ColumnValue::BigInt(1)), SqlType::Integer);

        assert!(result.unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_bind_all_requires_consecutive_indexes() {
        let mut writer = PgColumnWriter::new();
        writer.write(0, Some(ColumnValue::Integer(1)), SqlType::Integer).unwrap();
        writer.write(2, Some(ColumnValue::Integer(3)), SqlType::Integer).unwrap();

        assert!(matches!(
            writer.bind_all(sqlx::query("SELECT $1, $2")),
            Err(DatabaseError::MissingParameter(1))
        ));
    }
}
