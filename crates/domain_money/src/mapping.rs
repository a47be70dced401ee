//! Two-column mappings for monetary amounts
//!
//! Each mapping stores the currency in its first column and the amount in its
//! second, either as a NUMERIC amount or as a BIGINT count of minor units.

use std::str::FromStr;

use rust_decimal::Decimal;
use usertype_core::{MultiColumnMapping, UserTypeError};

use crate::columnmapper::{
    BigIntColumnLongMapper, IntegerColumnCurrencyUnitMapper, NumericColumnDecimalMapper,
    VarcharColumnCurrencyUnitMapper,
};
use crate::currency::CurrencyUnit;
use crate::money::{BigMoney, Money};

/// Property names of the mappings storing minor units
pub const MINOR_AMOUNT_PROPERTIES: &[&str] = &["currency_unit", "amount_minor"];

/// Property names of the mappings storing a decimal amount
pub const AMOUNT_PROPERTIES: &[&str] = &["currency_unit", "amount"];

/// `BigMoney` as an INTEGER numeric currency code and a BIGINT minor amount
///
/// Writing truncates any fraction finer than the currency's minor unit.
#[derive(Debug, Clone, Default)]
pub struct BigMoneyMinorAmountAndCurrencyAsInteger {
    currency: IntegerColumnCurrencyUnitMapper,
    amount_minor: BigIntColumnLongMapper,
}

impl MultiColumnMapping for BigMoneyMinorAmountAndCurrencyAsInteger {
    type Value = BigMoney;
    type First = IntegerColumnCurrencyUnitMapper;
    type Second = BigIntColumnLongMapper;

    fn property_names(&self) -> &'static [&'static str] {
        MINOR_AMOUNT_PROPERTIES
    }

    fn first(&self) -> &IntegerColumnCurrencyUnitMapper {
        &self.currency
    }

    fn second(&self) -> &BigIntColumnLongMapper {
        &self.amount_minor
    }

    fn from_converted_columns(
        &self,
        currency: CurrencyUnit,
        amount_minor: i64,
    ) -> Result<BigMoney, UserTypeError> {
        Ok(BigMoney::of_minor(currency, amount_minor))
    }

    fn to_converted_columns(&self, value: &BigMoney) -> Result<(CurrencyUnit, i64), UserTypeError> {
        Ok((value.currency(), value.amount_minor_long()?))
    }

    fn parse(&self, s: &str) -> Result<BigMoney, UserTypeError> {
        Ok(BigMoney::from_str(s)?)
    }

    fn format(&self, value: &BigMoney) -> String {
        value.to_string()
    }
}

/// `BigMoney` as a VARCHAR currency code and a NUMERIC amount, keeping its scale
#[derive(Debug, Clone, Default)]
pub struct BigMoneyAmountAndCurrency {
    currency: VarcharColumnCurrencyUnitMapper,
    amount: NumericColumnDecimalMapper,
}

impl MultiColumnMapping for BigMoneyAmountAndCurrency {
    type Value = BigMoney;
    type First = VarcharColumnCurrencyUnitMapper;
    type Second = NumericColumnDecimalMapper;

    fn property_names(&self) -> &'static [&'static str] {
        AMOUNT_PROPERTIES
    }

    fn first(&self) -> &VarcharColumnCurrencyUnitMapper {
        &self.currency
    }

    fn second(&self) -> &NumericColumnDecimalMapper {
        &self.amount
    }

    fn from_converted_columns(
        &self,
        currency: CurrencyUnit,
        amount: Decimal,
    ) -> Result<BigMoney, UserTypeError> {
        Ok(BigMoney::of(currency, amount))
    }

    fn to_converted_columns(
        &self,
        value: &BigMoney,
    ) -> Result<(CurrencyUnit, Decimal), UserTypeError> {
        Ok((value.currency(), value.amount()))
    }

    fn parse(&self, s: &str) -> Result<BigMoney, UserTypeError> {
        Ok(BigMoney::from_str(s)?)
    }

    fn format(&self, value: &BigMoney) -> String {
        value.to_string()
    }
}

/// `Money` as a VARCHAR currency code and a NUMERIC amount
///
/// Reading fails if the stored amount has more decimal places than the currency.
#[derive(Debug, Clone, Default)]
pub struct MoneyAmountAndCurrency {
    currency: VarcharColumnCurrencyUnitMapper,
    amount: NumericColumnDecimalMapper,
}

impl MultiColumnMapping for MoneyAmountAndCurrency {
    type Value = Money;
    type First = VarcharColumnCurrencyUnitMapper;
    type Second = NumericColumnDecimalMapper;

    fn property_names(&self) -> &'static [&'static str] {
        AMOUNT_PROPERTIES
    }

    fn first(&self) -> &VarcharColumnCurrencyUnitMapper {
        &self.currency
    }

    fn second(&self) -> &NumericColumnDecimalMapper {
        &self.amount
    }

    fn from_converted_columns(
        &self,
        currency: CurrencyUnit,
        amount: Decimal,
    ) -> Result<Money, UserTypeError> {
        Ok(Money::of(currency, amount)?)
    }

    fn to_converted_columns(&self, value: &Money) -> Result<(CurrencyUnit, Decimal), UserTypeError> {
        Ok((value.currency(), value.amount()))
    }

    fn parse(&self, s: &str) -> Result<Money, UserTypeError> {
        Ok(Money::from_str(s)?)
    }

    fn format(&self, value: &Money) -> String {
        value.to_string()
    }
}

/// `Money` as a VARCHAR currency code and a BIGINT minor amount
#[derive(Debug, Clone, Default)]
pub struct MoneyMinorAmountAndCurrency {
    currency: VarcharColumnCurrencyUnitMapper,
    amount_minor: BigIntColumnLongMapper,
}

impl MultiColumnMapping for MoneyMinorAmountAndCurrency {
    type Value = Money;
    type First = VarcharColumnCurrencyUnitMapper;
    type Second = BigIntColumnLongMapper;

    fn property_names(&self) -> &'static [&'static str] {
        MINOR_AMOUNT_PROPERTIES
    }

    fn first(&self) -> &VarcharColumnCurrencyUnitMapper {
        &self.currency
    }

    fn second(&self) -> &BigIntColumnLongMapper {
        &self.amount_minor
    }

    fn from_converted_columns(
        &self,
        currency: CurrencyUnit,
        amount_minor: i64,
    ) -> Result<Money, UserTypeError> {
        Ok(Money::of_minor(currency, amount_minor))
    }

    fn to_converted_columns(&self, value: &Money) -> Result<(CurrencyUnit, i64), UserTypeError> {
        Ok((value.currency(), value.amount_minor_long()?))
    }

    fn parse(&self, s: &str) -> Result<Money, UserTypeError> {
        Ok(Money::from_str(s)?)
    }

    fn format(&self, value: &Money) -> String {
        value.to_string()
    }
}
