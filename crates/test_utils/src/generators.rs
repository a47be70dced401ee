//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use domain_dateandtime::DatabaseZone;
use domain_money::{BigMoney, CurrencyUnit, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating any supported currency unit
pub fn currency_unit_strategy() -> impl Strategy<Value = CurrencyUnit> {
    proptest::sample::select(CurrencyUnit::VALUES.to_vec())
}

/// Strategy for generating valid positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating valid amount ranges
pub fn amount_minor_strategy() -> impl Strategy<Value = i64> {
    -1_000_000_000i64..1_000_000_000i64
}

/// Strategy for generating Money values (can be negative)
pub fn money_strategy() -> impl Strategy<Value = Money> {
    (currency_unit_strategy(), amount_minor_strategy())
        .prop_map(|(currency, amount)| Money::of_minor(currency, amount))
}

/// Strategy for generating Money values with positive amounts
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (currency_unit_strategy(), positive_amount_minor_strategy())
        .prop_map(|(currency, amount)| Money::of_minor(currency, amount))
}

/// Strategy for generating BigMoney at any scale up to eight decimal places
pub fn big_money_strategy() -> impl Strategy<Value = BigMoney> {
    (currency_unit_strategy(), amount_minor_strategy(), 0u32..8u32)
        .prop_map(|(currency, mantissa, scale)| BigMoney::of(currency, Decimal::new(mantissa, scale)))
}

/// Strategy for generating dates between 1970 and 2069
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..36_500).prop_map(|days| epoch_date() + Duration::days(days))
}

/// Strategy for generating times of day with microsecond precision
pub fn time_strategy() -> impl Strategy<Value = NaiveTime> {
    (0u32..86_400, 0u32..1_000_000).prop_map(|(secs, micros)| {
        NaiveTime::from_num_seconds_from_midnight_opt(secs, micros * 1_000)
            .unwrap_or(NaiveTime::MIN)
    })
}

/// Strategy for generating wall-clock date-times between 1970 and 2069
pub fn date_time_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (date_strategy(), time_strategy()).prop_map(|(date, time)| date.and_time(time))
}

/// Strategy for generating UTC instants with microsecond precision
///
/// PostgreSQL timestamps keep microseconds, so finer instants would not survive storage.
pub fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..3_155_760_000i64, 0i64..1_000_000i64).prop_map(|(secs, micros)| {
        Utc.timestamp_opt(secs, 0).single().unwrap_or_default() + Duration::microseconds(micros)
    })
}

/// Strategy for generating zones whose offsets are fixed since 1970
pub fn fixed_offset_zone_strategy() -> impl Strategy<Value = DatabaseZone> {
    prop_oneof![
        Just(DatabaseZone::new(chrono_tz::UTC)),
        Just(DatabaseZone::new(chrono_tz::Asia::Tokyo)),
        Just(DatabaseZone::new(chrono_tz::Asia::Kolkata)),
        Just(DatabaseZone::new(chrono_tz::America::Phoenix)),
        Just(DatabaseZone::new(chrono_tz::Asia::Dubai)),
        Just(DatabaseZone::new(chrono_tz::Pacific::Pago_Pago)),
    ]
}

/// Strategy for generating zones that observe daylight saving time
pub fn dst_zone_strategy() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(chrono_tz::Europe::London),
        Just(chrono_tz::Europe::Berlin),
        Just(chrono_tz::Europe::Lisbon),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::America::Santiago),
        Just(chrono_tz::Australia::Sydney),
        Just(chrono_tz::Pacific::Auckland),
    ]
}

fn epoch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}
