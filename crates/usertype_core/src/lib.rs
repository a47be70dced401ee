//! User Type Core - Shared building blocks for persistent user types
//!
//! This crate provides the extension points used by every user type in the workspace:
//! - Column values and SQL column kinds exchanged with the database driver
//! - Column mappers converting a single domain value to and from one column
//! - The `UserType` extension point, with single-column and multi-column implementations
//! - Per-mapping parameters and global settings
//! - A registry resolving the user type for a domain value type

pub mod column;
pub mod configuration;
pub mod error;
pub mod mapper;
pub mod multi_column;
pub mod registry;
pub mod user_type;

pub use column::{ColumnReader, ColumnValue, ColumnWriter, ParameterValues, RowValues, SqlType};
pub use configuration::{Parameters, Settings};
pub use error::UserTypeError;
pub use mapper::ColumnMapper;
pub use multi_column::{MultiColumnMapping, MultiColumnUserType};
pub use registry::UserTypeRegistry;
pub use user_type::{Configurable, ParameterizedUserType, UserType};
