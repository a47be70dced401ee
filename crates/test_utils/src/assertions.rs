//! Custom Test Assertions
//!
//! Provides specialized assertion helpers that give more meaningful error messages
//! than standard assertions.

use domain_money::{BigMoney, Money};
use rust_decimal::Decimal;
use usertype_core::{ColumnValue, ParameterValues, SqlType, UserType};

/// Asserts that two BigMoney values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &BigMoney, expected: &BigMoney, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value holds exactly its currency's decimal places
pub fn assert_money_at_currency_scale(money: &Money) {
    assert_eq!(
        money.amount().scale(),
        money.currency().decimal_places(),
        "Expected {} to have {} decimal places",
        money,
        money.currency().decimal_places()
    );
}

/// Asserts that a value survives disassembly into columns and reassembly
pub fn assert_column_round_trip<U: UserType + ?Sized>(user_type: &U, value: &U::Value) {
    let cached = user_type
        .disassemble(Some(value))
        .unwrap_or_else(|e| panic!("Failed to disassemble {:?}: {}", value, e));
    assert_eq!(
        cached.len(),
        user_type.sql_types().len(),
        "Cached form of {:?} has the wrong number of columns",
        value
    );

    let assembled = user_type
        .assemble(cached.clone())
        .unwrap_or_else(|e| panic!("Failed to assemble {:?}: {}", cached, e));
    assert_eq!(
        assembled.as_ref(),
        Some(value),
        "Value changed after storage as {:?}",
        cached
    );
}

/// Asserts that a value survives formatting and parsing
pub fn assert_string_round_trip<U: UserType + ?Sized>(user_type: &U, value: &U::Value) {
    let text = user_type.format_value(value);
    let parsed = user_type
        .parse_value(&text)
        .unwrap_or_else(|e| panic!("Failed to parse '{}': {}", text, e));
    assert_eq!(&parsed, value, "Value changed after formatting as '{}'", text);
}

/// Asserts that NULL is written as one typed NULL per column and read back as `None`
pub fn assert_null_handling<U: UserType + ?Sized>(user_type: &U) {
    let mut parameters = ParameterValues::new();
    user_type
        .null_safe_set(&mut parameters, None, 0)
        .unwrap_or_else(|e| panic!("Failed to bind NULL: {}", e));

    let expected: Vec<(SqlType, Option<ColumnValue>)> =
        user_type.sql_types().into_iter().map(|t| (t, None)).collect();
    assert_eq!(parameters.into_vec(), expected, "NULL was not bound as typed NULLs");

    let cached = vec![None; user_type.sql_types().len()];
    assert_eq!(
        user_type.assemble(cached).unwrap_or_else(|e| panic!("Failed to assemble NULLs: {}", e)),
        None,
        "NULL columns did not read back as None"
    );
}
