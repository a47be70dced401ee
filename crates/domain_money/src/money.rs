//! Monetary amounts with precise decimal arithmetic
//!
//! [`BigMoney`] carries an amount of any scale. [`Money`] always holds exactly
//! the currency's decimal places, so converting one into the other either
//! rounds explicitly or fails.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use usertype_core::UserTypeError;

use crate::currency::CurrencyUnit;

/// Errors that can occur during money operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Amount {amount} has more decimal places than {currency} allows")]
    RoundingRequired {
        amount: Decimal,
        currency: CurrencyUnit,
    },

    #[error("Overflow during calculation")]
    Overflow,

    #[error("Invalid money text '{0}'")]
    Parse(String),
}

impl From<MoneyError> for UserTypeError {
    fn from(error: MoneyError) -> Self {
        UserTypeError::domain(error)
    }
}

fn ensure_same_currency(a: CurrencyUnit, b: CurrencyUnit) -> Result<(), MoneyError> {
    if a != b {
        return Err(MoneyError::CurrencyMismatch(a.to_string(), b.to_string()));
    }
    Ok(())
}

/// Rescales to exactly `dp` places, failing if the mantissa cannot hold it
fn rescaled(amount: Decimal, dp: u32) -> Result<Decimal, MoneyError> {
    let mut value = amount;
    value.rescale(dp);
    if value.scale() != dp {
        return Err(MoneyError::Overflow);
    }
    Ok(value)
}

fn split_money_text(s: &str) -> Result<(CurrencyUnit, Decimal), MoneyError> {
    let (code, amount) = s
        .trim()
        .split_once(char::is_whitespace)
        .ok_or_else(|| MoneyError::Parse(s.to_string()))?;
    let currency = CurrencyUnit::of(code)?;
    let amount = Decimal::from_str(amount.trim()).map_err(|_| MoneyError::Parse(s.to_string()))?;
    Ok((currency, amount))
}

/// A monetary amount of arbitrary scale with associated currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BigMoney {
    currency: CurrencyUnit,
    amount: Decimal,
}

impl BigMoney {
    pub fn of(currency: CurrencyUnit, amount: Decimal) -> Self {
        Self { currency, amount }
    }

    /// Creates a value from an amount in minor units (e.g., cents)
    pub fn of_minor(currency: CurrencyUnit, amount_minor: i64) -> Self {
        Self {
            currency,
            amount: Decimal::new(amount_minor, currency.decimal_places()),
        }
    }

    pub fn zero(currency: CurrencyUnit) -> Self {
        Self {
            currency,
            amount: Decimal::ZERO,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> CurrencyUnit {
        self.currency
    }

    pub fn scale(&self) -> u32 {
        self.amount.scale()
    }

    /// Returns the amount in minor units, truncating any finer fraction
    pub fn amount_minor(&self) -> Result<i128, MoneyError> {
        let dp = self.currency.decimal_places();
        let truncated = self.amount.round_dp_with_strategy(dp, RoundingStrategy::ToZero);
        Ok(rescaled(truncated, dp)?.mantissa())
    }

    /// Returns the amount in minor units as an `i64`
    pub fn amount_minor_long(&self) -> Result<i64, MoneyError> {
        i64::try_from(self.amount_minor()?).map_err(|_| MoneyError::Overflow)
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    pub fn abs(&self) -> Self {
        Self::of(self.currency, self.amount.abs())
    }

    pub fn negated(&self) -> Self {
        Self::of(self.currency, -self.amount)
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &BigMoney) -> Result<BigMoney, MoneyError> {
        ensure_same_currency(self.currency, other.currency)?;
        let amount = self.amount.checked_add(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::of(self.currency, amount))
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &BigMoney) -> Result<BigMoney, MoneyError> {
        ensure_same_currency(self.currency, other.currency)?;
        let amount = self.amount.checked_sub(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::of(self.currency, amount))
    }

    /// Multiplies by a scalar (e.g., for rate calculations)
    pub fn multiply(&self, factor: Decimal) -> Result<BigMoney, MoneyError> {
        let amount = self.amount.checked_mul(factor).ok_or(MoneyError::Overflow)?;
        Ok(Self::of(self.currency, amount))
    }

    /// Rounds to the currency's decimal places using `strategy`
    pub fn to_money(&self, strategy: RoundingStrategy) -> Result<Money, MoneyError> {
        Money::of_rounded(self.currency, self.amount, strategy)
    }

    /// Converts without rounding, failing if the amount has a finer fraction
    pub fn to_money_exact(&self) -> Result<Money, MoneyError> {
        Money::of(self.currency, self.amount)
    }
}

impl fmt::Display for BigMoney {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

impl FromStr for BigMoney {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (currency, amount) = split_money_text(s)?;
        Ok(Self::of(currency, amount))
    }
}

impl Neg for BigMoney {
    type Output = Self;

    fn neg(self) -> Self {
        self.negated()
    }
}

impl From<Money> for BigMoney {
    fn from(money: Money) -> Self {
        money.to_big_money()
    }
}

/// A monetary amount held at exactly its currency's decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "BigMoney", try_from = "BigMoney")]
pub struct Money {
    currency: CurrencyUnit,
    amount: Decimal,
}

impl Money {
    /// Creates a value, failing if `amount` needs rounding to fit the currency
    pub fn of(currency: CurrencyUnit, amount: Decimal) -> Result<Self, MoneyError> {
        let dp = currency.decimal_places();
        if amount.round_dp(dp) != amount {
            return Err(MoneyError::RoundingRequired { amount, currency });
        }
        Ok(Self {
            currency,
            amount: rescaled(amount, dp)?,
        })
    }

    pub fn of_rounded(
        currency: CurrencyUnit,
        amount: Decimal,
        strategy: RoundingStrategy,
    ) -> Result<Self, MoneyError> {
        let dp = currency.decimal_places();
        Ok(Self {
            currency,
            amount: rescaled(amount.round_dp_with_strategy(dp, strategy), dp)?,
        })
    }

    /// Creates Money from an integer amount in minor units (e.g., cents)
    pub fn of_minor(currency: CurrencyUnit, amount_minor: i64) -> Self {
        Self {
            currency,
            amount: Decimal::new(amount_minor, currency.decimal_places()),
        }
    }

    pub fn zero(currency: CurrencyUnit) -> Self {
        Self::of_minor(currency, 0)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> CurrencyUnit {
        self.currency
    }

    pub fn amount_minor(&self) -> i128 {
        self.amount.mantissa()
    }

    pub fn amount_minor_long(&self) -> Result<i64, MoneyError> {
        i64::try_from(self.amount.mantissa()).map_err(|_| MoneyError::Overflow)
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    pub fn abs(&self) -> Self {
        Self {
            currency: self.currency,
            amount: self.amount.abs(),
        }
    }

    pub fn negated(&self) -> Self {
        Self {
            currency: self.currency,
            amount: -self.amount,
        }
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        ensure_same_currency(self.currency, other.currency)?;
        let amount = self.amount.checked_add(other.amount).ok_or(MoneyError::Overflow)?;
        Self::of(self.currency, amount)
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        ensure_same_currency(self.currency, other.currency)?;
        let amount = self.amount.checked_sub(other.amount).ok_or(MoneyError::Overflow)?;
        Self::of(self.currency, amount)
    }

    pub fn to_big_money(&self) -> BigMoney {
        BigMoney::of(self.currency, self.amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (currency, amount) = split_money_text(s)?;
        Self::of(currency, amount)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        self.negated()
    }
}

impl TryFrom<BigMoney> for Money {
    type Error = MoneyError;

    fn try_from(value: BigMoney) -> Result<Self, Self::Error> {
        value.to_money_exact()
    }
}
