//! Infrastructure Database Layer
//!
//! This crate connects user types to PostgreSQL using SQLx.
//!
//! # Architecture
//!
//! - [`PgColumnWriter`] receives the parameters a user type writes and binds them
//!   onto a query, including typed NULLs
//! - [`PgRowReader`] lets a user type read its columns from a fetched row
//! - [`ValueStore`] stores one user-typed value per key, generating its SQL from
//!   the user type's property names
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_db::{create_pool, DatabaseConfig, ValueRepository, ValueStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/usertypes")).await?;
//! let store = ValueStore::new(pool, "prices", Arc::new(PersistentMoneyAmountAndCurrency::default()))?;
//! store.ensure_table().await?;
//! store.save("widget", Some(&price)).await?;
//! ```

pub mod binding;
pub mod error;
pub mod pool;
pub mod store;

pub use binding::{PgColumnWriter, PgQuery, PgRowReader};
pub use error::DatabaseError;
pub use pool::{create_pool, DatabaseConfig, DatabasePool};
pub use store::{ValueRepository, ValueStore};
