//! Money and Currency User Types
//!
//! This crate provides currency units and monetary amounts together with the
//! user types that persist them:
//! - `BigMoney` of any scale, stored as a numeric currency code and a minor amount
//!   or as a currency code and a decimal amount
//! - `Money` at its currency's scale, stored across one or two columns
//! - `CurrencyUnit` alone, as its alphabetic or numeric code
//!
//! All amounts use rust_decimal for precise arithmetic without floating-point errors.

pub mod columnmapper;
pub mod currency;
pub mod integrator;
pub mod mapping;
pub mod money;

use usertype_core::{MultiColumnUserType, ParameterizedUserType};

use crate::columnmapper::{
    IntegerColumnCurrencyUnitMapper, NumericColumnMoneyMapper, VarcharColumnCurrencyUnitMapper,
};
use crate::mapping::{
    BigMoneyAmountAndCurrency, BigMoneyMinorAmountAndCurrencyAsInteger, MoneyAmountAndCurrency,
    MoneyMinorAmountAndCurrency,
};

pub use currency::CurrencyUnit;
pub use integrator::register_user_types;
pub use money::{BigMoney, Money, MoneyError};

/// Persists `BigMoney` as an INTEGER currency code and a BIGINT minor amount
pub type PersistentBigMoneyMinorAmountAndCurrencyAsInteger =
    MultiColumnUserType<BigMoneyMinorAmountAndCurrencyAsInteger>;

/// Persists `BigMoney` as a VARCHAR currency code and a NUMERIC amount
pub type PersistentBigMoneyAmountAndCurrency = MultiColumnUserType<BigMoneyAmountAndCurrency>;

/// Persists `Money` as a VARCHAR currency code and a NUMERIC amount
pub type PersistentMoneyAmountAndCurrency = MultiColumnUserType<MoneyAmountAndCurrency>;

/// Persists `Money` as a VARCHAR currency code and a BIGINT minor amount
pub type PersistentMoneyMinorAmountAndCurrency = MultiColumnUserType<MoneyMinorAmountAndCurrency>;

/// Persists `Money` as a NUMERIC amount in the configured `currency_code`
pub type PersistentMoneyAmount = ParameterizedUserType<NumericColumnMoneyMapper>;

/// Persists a `CurrencyUnit` as its alphabetic code
pub type PersistentCurrencyUnit = ParameterizedUserType<VarcharColumnCurrencyUnitMapper>;

/// Persists a `CurrencyUnit` as its ISO 4217 numeric code
pub type PersistentCurrencyUnitAsInteger = ParameterizedUserType<IntegerColumnCurrencyUnitMapper>;
