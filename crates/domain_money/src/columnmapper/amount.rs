//! Amounts in BIGINT or NUMERIC columns

use std::str::FromStr;

use rust_decimal::Decimal;
use usertype_core::configuration::keys;
use usertype_core::{ColumnMapper, ColumnValue, Parameters, Settings, SqlType, UserTypeError};

use crate::currency::CurrencyUnit;
use crate::money::{Money, MoneyError};

/// Maps an `i64` to a BIGINT column unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct BigIntColumnLongMapper;

impl ColumnMapper for BigIntColumnLongMapper {
    type Value = i64;

    fn sql_type(&self) -> SqlType {
        SqlType::BigInt
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<i64, UserTypeError> {
        value.into_big_int()
    }

    fn to_non_null_value(&self, value: &i64) -> Result<ColumnValue, UserTypeError> {
        Ok(ColumnValue::BigInt(*value))
    }

    fn from_non_null_string(&self, s: &str) -> Result<i64, UserTypeError> {
        s.trim().parse().map_err(|e| UserTypeError::parse(s, "i64", e))
    }

    fn to_non_null_string(&self, value: &i64) -> String {
        value.to_string()
    }
}

/// Maps a `Decimal` to a NUMERIC column unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericColumnDecimalMapper;

impl ColumnMapper for NumericColumnDecimalMapper {
    type Value = Decimal;

    fn sql_type(&self) -> SqlType {
        SqlType::Numeric
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<Decimal, UserTypeError> {
        value.into_numeric()
    }

    fn to_non_null_value(&self, value: &Decimal) -> Result<ColumnValue, UserTypeError> {
        Ok(ColumnValue::Numeric(*value))
    }

    fn from_non_null_string(&self, s: &str) -> Result<Decimal, UserTypeError> {
        Decimal::from_str(s.trim()).map_err(|e| UserTypeError::parse(s, "Decimal", e))
    }

    fn to_non_null_string(&self, value: &Decimal) -> String {
        value.to_string()
    }
}

/// Maps `Money` to a NUMERIC amount column in a configured currency
///
/// The currency comes from the `currency_code` parameter or setting and must be
/// present before any value is converted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericColumnMoneyMapper {
    currency: Option<CurrencyUnit>,
}

impl NumericColumnMoneyMapper {
    pub fn new(currency: CurrencyUnit) -> Self {
        Self {
            currency: Some(currency),
        }
    }

    pub fn currency(&self) -> Option<CurrencyUnit> {
        self.currency
    }

    fn required_currency(&self) -> Result<CurrencyUnit, UserTypeError> {
        self.currency
            .ok_or_else(|| UserTypeError::MissingParameter(keys::CURRENCY_CODE.to_string()))
    }
}

impl ColumnMapper for NumericColumnMoneyMapper {
    type Value = Money;

    fn sql_type(&self) -> SqlType {
        SqlType::Numeric
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<Money, UserTypeError> {
        Ok(Money::of(self.required_currency()?, value.into_numeric()?)?)
    }

    fn to_non_null_value(&self, value: &Money) -> Result<ColumnValue, UserTypeError> {
        let currency = self.required_currency()?;
        if value.currency() != currency {
            return Err(MoneyError::CurrencyMismatch(
                currency.to_string(),
                value.currency().to_string(),
            )
            .into());
        }
        Ok(ColumnValue::Numeric(value.amount()))
    }

    fn from_non_null_string(&self, s: &str) -> Result<Money, UserTypeError> {
        Ok(Money::from_str(s)?)
    }

    fn to_non_null_string(&self, value: &Money) -> String {
        value.to_string()
    }

    fn configure(&mut self, parameters: &Parameters, settings: &Settings) -> Result<(), UserTypeError> {
        if let Some(code) = settings.resolve(parameters, keys::CURRENCY_CODE) {
            let currency = CurrencyUnit::of(code)
                .map_err(|e| UserTypeError::invalid_parameter(keys::CURRENCY_CODE, code, e))?;
            self.currency = Some(currency);
        }
        Ok(())
    }
}
