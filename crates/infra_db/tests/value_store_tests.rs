//! Integration tests for storing user-typed values in PostgreSQL
//!
//! SQL generation is checked without a database. Tests that need a running
//! PostgreSQL container are ignored by default; run them with
//! `cargo test -p infra_db -- --ignored`.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use domain_dateandtime::{PersistentInstantAsTimestampTz, PersistentNaiveDate};
use domain_money::{
    BigMoney, CurrencyUnit, Money, PersistentBigMoneyMinorAmountAndCurrencyAsInteger,
    PersistentMoneyAmountAndCurrency,
};
use infra_db::{DatabaseError, ValueRepository, ValueStore};
use rust_decimal_macros::dec;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use test_utils::{db_test, init_test_tracing, MoneyFixtures};
use usertype_core::configuration::keys;
use usertype_core::{Configurable, Parameters, Settings, UserTypeRegistry};

fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://localhost/never_connected")
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sydney_dates() -> PersistentNaiveDate {
    PersistentNaiveDate::default()
        .configured(
            Parameters::new().with(keys::DATABASE_ZONE, "Australia/Sydney"),
            &Settings::default(),
        )
        .unwrap()
}

mod sql_generation {
    use super::*;

    #[tokio::test]
    async fn test_multi_column_store_uses_property_names() {
        init_test_tracing();
        let store = ValueStore::new(
            lazy_pool(),
            "prices",
            Arc::new(PersistentBigMoneyMinorAmountAndCurrencyAsInteger::default()),
        )
        .unwrap();

        assert_eq!(store.columns(), &["currency_unit", "amount_minor"]);
        assert_eq!(
            store.create_table_sql(),
            "CREATE TABLE IF NOT EXISTS prices (key VARCHAR PRIMARY KEY, currency_unit INTEGER, amount_minor BIGINT)"
        );
        assert_eq!(
            store.upsert_sql(),
            "INSERT INTO prices (key, currency_unit, amount_minor) VALUES ($1, $2, $3) \
             ON CONFLICT (key) DO UPDATE SET currency_unit = EXCLUDED.currency_unit, \
             amount_minor = EXCLUDED.amount_minor"
        );
        assert_eq!(
            store.select_sql(),
            "SELECT currency_unit, amount_minor FROM prices WHERE key = $1"
        );
    }

    #[tokio::test]
    async fn test_single_column_store_uses_value_column() {
        let store = ValueStore::new(lazy_pool(), "birthdays", Arc::new(sydney_dates())).unwrap();

        assert_eq!(store.columns(), &["value"]);
        assert_eq!(store.delete_sql(), "DELETE FROM birthdays WHERE key = $1");
    }

    #[tokio::test]
    async fn test_rejects_unsafe_table_name() {
        let result = ValueStore::new(
            lazy_pool(),
            "prices; DROP TABLE prices",
            Arc::new(PersistentMoneyAmountAndCurrency::default()),
        );

        assert!(matches!(result, Err(DatabaseError::InvalidIdentifier(_))));
    }
}

mod postgres {
    use super::*;

    db_test!(test_big_money_survives_storage, |db| {
        let store = db
            .value_store(
                "prices",
                Arc::new(PersistentBigMoneyMinorAmountAndCurrencyAsInteger::default()),
            )
            .await
            .unwrap();

        let price = BigMoney::of(CurrencyUnit::GBP, dec!(19.99));
        store.save("widget", Some(&price)).await.unwrap();

        assert_eq!(store.load("widget").await.unwrap(), Some(price));

        let row = sqlx::query("SELECT currency_unit, amount_minor FROM prices WHERE key = 'widget'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(row.get::<i32, _>("currency_unit"), 826);
        assert_eq!(row.get::<i64, _>("amount_minor"), 1999);
    });

    db_test!(test_save_replaces_previous_value, |db| {
        let store = db
            .value_store("balances", Arc::new(PersistentMoneyAmountAndCurrency::default()))
            .await
            .unwrap();

        store.save("acct", Some(&MoneyFixtures::usd_100())).await.unwrap();
        store.save("acct", Some(&MoneyFixtures::usd_refund())).await.unwrap();

        assert_eq!(
            store.load("acct").await.unwrap(),
            Some(Money::of_minor(CurrencyUnit::USD, -5_000))
        );
    });

    db_test!(test_null_and_missing_values, |db| {
        let store = db
            .value_store("balances", Arc::new(PersistentMoneyAmountAndCurrency::default()))
            .await
            .unwrap();

        store.save("empty", None).await.unwrap();
        assert_eq!(store.load("empty").await.unwrap(), None);
        assert!(store.load("absent").await.unwrap_err().is_not_found());

        assert!(store.delete("empty").await.unwrap());
        assert!(!store.delete("empty").await.unwrap());
    });

    db_test!(test_date_column_keeps_calendar_date, |db| {
        let store = db.value_store("birthdays", Arc::new(sydney_dates())).await.unwrap();

        store.save("ada", Some(&date(2024, 12, 10))).await.unwrap();
        assert_eq!(store.load("ada").await.unwrap(), Some(date(2024, 12, 10)));

        let stored: NaiveDate = sqlx::query_scalar("SELECT value FROM birthdays WHERE key = 'ada'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(stored, date(2024, 12, 10));
    });

    db_test!(test_instant_in_timestamptz_column, |db| {
        let store = db
            .value_store("events", Arc::new(PersistentInstantAsTimestampTz::default()))
            .await
            .unwrap();

        let instant = Utc.with_ymd_and_hms(2024, 3, 31, 1, 30, 0).unwrap();
        store.save("launch", Some(&instant)).await.unwrap();

        assert_eq!(store.load("launch").await.unwrap(), Some(instant));
    });

    db_test!(test_instant_unaffected_by_session_zone, |db| {
        let store = db
            .value_store("events", Arc::new(PersistentInstantAsTimestampTz::default()))
            .await
            .unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 10, 27, 0, 45, 0).unwrap();
        store.save("fallback", Some(&instant)).await.unwrap();

        let tokyo = db.pool_in_session_zone("Asia/Tokyo").await.unwrap();
        let tokyo_store = ValueStore::new(
            tokyo.clone(),
            "events",
            Arc::new(PersistentInstantAsTimestampTz::default()),
        )
        .unwrap();
        assert_eq!(tokyo_store.load("fallback").await.unwrap(), Some(instant));

        let rendered: String =
            sqlx::query_scalar("SELECT value::text FROM events WHERE key = 'fallback'")
                .fetch_one(&tokyo)
                .await
                .unwrap();
        assert_eq!(rendered, "2024-10-27 09:45:00+09");
    });

    db_test!(test_registry_default_drives_store, |db| {
        let settings = Settings::default();
        let mut registry = UserTypeRegistry::new();
        domain_money::register_user_types(&mut registry, &settings).unwrap();

        let user_type = registry.default_for::<Money>().unwrap();
        let store = db.value_store("wallets", user_type).await.unwrap();

        let money = Money::of_minor(CurrencyUnit::JPY, 5_000);
        store.save("alice", Some(&money)).await.unwrap();
        assert_eq!(store.load("alice").await.unwrap(), Some(money));
    });

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_wrong_column_kind_is_a_conversion_error() -> anyhow::Result<()> {
        init_test_tracing();
        let db = test_utils::TestDatabase::start()
            .await
            .map_err(|e| anyhow::anyhow!(e))?;

        sqlx::query("CREATE TABLE mislabelled (key VARCHAR PRIMARY KEY, value VARCHAR)")
            .execute(db.pool())
            .await?;
        sqlx::query("INSERT INTO mislabelled VALUES ('k', 'not a date')")
            .execute(db.pool())
            .await?;

        let store = ValueStore::new(db.pool().clone(), "mislabelled", Arc::new(sydney_dates()))?;
        let error = store.load("k").await.unwrap_err();

        assert!(matches!(error, DatabaseError::Conversion(_)));
        Ok(())
    }
}
