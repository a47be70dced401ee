//! Pre-built Test Fixtures
//!
//! Provides ready-to-use values and settings for common scenarios. These fixtures
//! are consistent and predictable for unit tests.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use domain_money::{BigMoney, CurrencyUnit, Money};
use rust_decimal_macros::dec;
use usertype_core::configuration::keys;
use usertype_core::Settings;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard USD amount
    pub fn usd_100() -> Money {
        Money::of_minor(CurrencyUnit::USD, 10_000)
    }

    /// A EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::of_minor(CurrencyUnit::EUR, 10_000)
    }

    /// A JPY amount (zero decimal places)
    pub fn jpy_10000() -> Money {
        Money::of_minor(CurrencyUnit::JPY, 10_000)
    }

    /// A KWD amount (three decimal places)
    pub fn kwd_fractional() -> Money {
        Money::of_minor(CurrencyUnit::KWD, 1_234)
    }

    /// A negative amount for refund scenarios
    pub fn usd_refund() -> Money {
        Money::of_minor(CurrencyUnit::USD, -5_000)
    }

    /// A BigMoney amount finer than the currency's minor unit
    pub fn usd_sub_cent() -> BigMoney {
        BigMoney::of(CurrencyUnit::USD, dec!(10.005))
    }
}

/// Fixture for calendar and clock values around zone transitions
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// 29 February of a leap year
    pub fn leap_day() -> NaiveDate {
        date(2024, 2, 29)
    }

    /// A day whose midnight does not exist in America/Santiago
    pub fn santiago_gap_day() -> NaiveDate {
        date(2022, 9, 11)
    }

    /// A wall-clock time skipped by the spring transition in Europe/London
    pub fn london_gap_time() -> NaiveDateTime {
        date(2024, 3, 31).and_hms_opt(1, 30, 0).unwrap_or_default()
    }

    /// A wall-clock time occurring twice at the autumn transition in Europe/London
    pub fn london_repeated_time() -> NaiveDateTime {
        date(2024, 10, 27).and_hms_opt(1, 30, 0).unwrap_or_default()
    }

    /// One billion seconds after the epoch
    pub fn billennium() -> DateTime<Utc> {
        Utc.timestamp_opt(1_000_000_000, 0).single().unwrap_or_default()
    }
}

/// Fixture for global settings
pub struct SettingsFixtures;

impl SettingsFixtures {
    /// Settings with the given database zone
    pub fn with_database_zone(zone: &str) -> Settings {
        Settings::default().with_property(keys::DATABASE_ZONE, zone)
    }

    /// Settings with a database zone and a default currency
    pub fn sydney_in_aud() -> Settings {
        Settings::default()
            .with_property(keys::DATABASE_ZONE, "Australia/Sydney")
            .with_property(keys::CURRENCY_CODE, "AUD")
    }

    /// Settings with automatic registration switched off
    pub fn manual_registration() -> Settings {
        Settings {
            auto_register_user_types: false,
            ..Settings::default()
        }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
