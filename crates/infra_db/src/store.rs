//! Keyed storage of user-typed values
//!
//! A `ValueStore` keeps one value per key in a table with a `key` column and one
//! column per property of the user type. It is the smallest schema that lets a
//! user type be exercised against a real database.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};
use usertype_core::{ColumnValue, ColumnWriter, SqlType, UserType};

use crate::binding::{PgColumnWriter, PgRowReader};
use crate::error::DatabaseError;

/// Name of the key column of every value table
pub const KEY_COLUMN: &str = "key";

/// Column name used by single-column user types that declare no properties
pub const VALUE_COLUMN: &str = "value";

const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Standard operations for storing values under string keys
#[async_trait]
pub trait ValueRepository<V>: Send + Sync
where
    V: Send + Sync,
{
    /// Inserts or replaces the value stored under `key`; `None` stores NULLs
    async fn save(&self, key: &str, value: Option<&V>) -> Result<(), DatabaseError>;

    /// Loads the value stored under `key`
    ///
    /// Returns `NotFound` if the key is absent and `Ok(None)` if NULLs were stored.
    async fn load(&self, key: &str) -> Result<Option<V>, DatabaseError>;

    /// Deletes the value stored under `key`, returning whether a row was removed
    async fn delete(&self, key: &str) -> Result<bool, DatabaseError>;
}

/// PostgreSQL-backed value storage driven by a user type
pub struct ValueStore<V> {
    pool: PgPool,
    table: String,
    columns: Vec<String>,
    user_type: Arc<dyn UserType<Value = V>>,
}

impl<V> ValueStore<V>
where
    V: Clone + PartialEq + fmt::Debug + Send + Sync,
{
    /// Creates a store over `table`, naming columns after the user type's properties
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidIdentifier` if the table or a property name is
    /// not a plain SQL identifier.
    pub fn new(
        pool: PgPool,
        table: impl Into<String>,
        user_type: Arc<dyn UserType<Value = V>>,
    ) -> Result<Self, DatabaseError> {
        let table = table.into();
        validate_identifier(&table)?;

        let columns = value_columns(user_type.as_ref());
        for column in &columns {
            validate_identifier(column)?;
        }

        Ok(Self {
            pool,
            table,
            columns,
            user_type,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Value column names, in the order the user type binds them
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn create_table_sql(&self) -> String {
        let definitions: Vec<String> = self
            .columns
            .iter()
            .zip(self.user_type.sql_types())
            .map(|(column, sql_type)| format!("{} {}", column, sql_type.name()))
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({} VARCHAR PRIMARY KEY, {})",
            self.table,
            KEY_COLUMN,
            definitions.join(", ")
        )
    }

    pub fn upsert_sql(&self) -> String {
        let placeholders: Vec<String> = (2..self.columns.len() + 2)
            .map(|i| format!("${}", i))
            .collect();
        let updates: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} = EXCLUDED.{}", c, c))
            .collect();
        format!(
            "INSERT INTO {} ({}, {}) VALUES ($1, {}) ON CONFLICT ({}) DO UPDATE SET {}",
            self.table,
            KEY_COLUMN,
            self.columns.join(", "),
            placeholders.join(", "),
            KEY_COLUMN,
            updates.join(", ")
        )
    }

    pub fn select_sql(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = $1",
            self.columns.join(", "),
            self.table,
            KEY_COLUMN
        )
    }

    pub fn delete_sql(&self) -> String {
        format!("DELETE FROM {} WHERE {} = $1", self.table, KEY_COLUMN)
    }

    /// Creates the value table if it does not exist
    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn ensure_table(&self) -> Result<(), DatabaseError> {
        sqlx::query(&self.create_table_sql())
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;
        debug!("Value table ready");
        Ok(())
    }
}

impl<V> Clone for ValueStore<V> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            table: self.table.clone(),
            columns: self.columns.clone(),
            user_type: Arc::clone(&self.user_type),
        }
    }
}

impl<V> fmt::Debug for ValueStore<V>
where
    V: Clone + PartialEq + fmt::Debug + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueStore")
            .field("table", &self.table)
            .field("columns", &self.columns)
            .field("returned_type", &self.user_type.returned_type())
            .finish()
    }
}

#[async_trait]
impl<V> ValueRepository<V> for ValueStore<V>
where
    V: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
{
    #[instrument(skip(self, value), fields(table = %self.table))]
    async fn save(&self, key: &str, value: Option<&V>) -> Result<(), DatabaseError> {
        let mut writer = PgColumnWriter::new();
        writer.write(0, Some(ColumnValue::Varchar(key.to_string())), SqlType::Varchar)?;
        self.user_type.null_safe_set(&mut writer, value, 1)?;

        let sql = self.upsert_sql();
        writer
            .bind_all(sqlx::query(&sql))?
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        debug!(is_null = value.is_none(), "Saved value");
        Ok(())
    }

    #[instrument(skip(self), fields(table = %self.table))]
    async fn load(&self, key: &str) -> Result<Option<V>, DatabaseError> {
        let sql = self.select_sql();
        let row = sqlx::query(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?
            .ok_or_else(|| DatabaseError::not_found(&self.table, key))?;

        let names: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let value = self.user_type.null_safe_get(&PgRowReader::new(&row), &names)?;

        debug!(is_null = value.is_none(), "Loaded value");
        Ok(value)
    }

    #[instrument(skip(self), fields(table = %self.table))]
    async fn delete(&self, key: &str) -> Result<bool, DatabaseError> {
        let sql = self.delete_sql();
        let result = sqlx::query(&sql)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        let deleted = result.rows_affected() > 0;
        debug!(deleted, "Deleted value");
        Ok(deleted)
    }
}

fn value_columns<V>(user_type: &dyn UserType<Value = V>) -> Vec<String>
where
    V: Clone + PartialEq + fmt::Debug + Send + Sync,
{
    let properties = user_type.property_names();
    if !properties.is_empty() {
        return properties.iter().map(|p| p.to_string()).collect();
    }

    match user_type.sql_types().len() {
        1 => vec![VALUE_COLUMN.to_string()],
        n => (0..n).map(|i| format!("{}_{}", VALUE_COLUMN, i)).collect(),
    }
}

fn validate_identifier(name: &str) -> Result<(), DatabaseError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest && name.len() <= MAX_IDENTIFIER_LENGTH {
        Ok(())
    } else {
        Err(DatabaseError::InvalidIdentifier(name.to_string()))
    }
}
