//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! user type test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built values and settings for common scenarios
//! - `database`: Database test helpers and container management
//! - `assertions`: Custom assertion helpers for user types and money
//! - `generators`: Property-based test data generators
//! - `logging`: Tracing subscriber setup for tests

pub mod assertions;
pub mod database;
pub mod fixtures;
pub mod generators;
pub mod logging;

pub use assertions::*;
pub use database::*;
pub use fixtures::*;
pub use generators::*;
pub use logging::init_test_tracing;
