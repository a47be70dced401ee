//! Integration tests for the date and time user types
//!
//! Tests cover reading and binding through the user type extension point,
//! zone configuration from parameters and settings, and registration.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use domain_dateandtime::{
    register_user_types, DatabaseZone, PersistentDurationAsString, PersistentInstantAsMillis,
    PersistentNaiveDate, PersistentNaiveTime, PersistentZonedDateTime,
};
use usertype_core::configuration::keys;
use usertype_core::{
    ColumnValue, Configurable, ParameterValues, Parameters, RowValues, Settings, SqlType, UserType,
    UserTypeError, UserTypeRegistry,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod naive_date {
    use super::*;

    #[test]
    fn test_reads_date_column() {
        let user_type = PersistentNaiveDate::default();
        let row = RowValues::new().with("birth_date", Some(ColumnValue::Date(date(1990, 6, 1))));

        let value = user_type.null_safe_get(&row, &["birth_date"]).unwrap();
        assert_eq!(value, Some(date(1990, 6, 1)));
    }

    #[test]
    fn test_reads_null_as_none() {
        let user_type = PersistentNaiveDate::default();
        let row = RowValues::new().with("birth_date", None);

        assert_eq!(user_type.null_safe_get(&row, &["birth_date"]).unwrap(), None);
    }

    #[test]
    fn test_binds_date_and_null() {
        let user_type = PersistentNaiveDate::default();
        let mut params = ParameterValues::new();

        user_type.null_safe_set(&mut params, Some(&date(2000, 1, 1)), 1).unwrap();
        user_type.null_safe_set(&mut params, None, 2).unwrap();

        assert_eq!(
            params.into_vec(),
            vec![
                (SqlType::Date, Some(ColumnValue::Date(date(2000, 1, 1)))),
                (SqlType::Date, None),
            ]
        );
    }

    #[test]
    fn test_database_zone_parameter() {
        let user_type = PersistentNaiveDate::default()
            .configured(
                Parameters::new().with(keys::DATABASE_ZONE, "Pacific/Auckland"),
                &Settings::default(),
            )
            .unwrap();

        let mut params = ParameterValues::new();
        user_type.null_safe_set(&mut params, Some(&date(2024, 1, 10)), 0).unwrap();

        assert_eq!(params.get(0), Some(&Some(ColumnValue::Date(date(2024, 1, 10)))));
        assert_eq!(
            user_type.mapper().start_of_day(date(2024, 1, 10)),
            Utc.with_ymd_and_hms(2024, 1, 9, 11, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_database_zone_from_global_settings() {
        let settings = Settings::default().with_property(keys::DATABASE_ZONE, "Asia/Tokyo");
        let user_type = PersistentNaiveDate::default()
            .configured(Parameters::new(), &settings)
            .unwrap();

        assert_eq!(
            user_type.mapper().database_zone(),
            DatabaseZone::new(chrono_tz::Asia::Tokyo)
        );
    }

    #[test]
    fn test_local_keyword_selects_process_zone() {
        let user_type = PersistentNaiveDate::default()
            .configured(
                Parameters::new().with(keys::DATABASE_ZONE, "local"),
                &Settings::default().with_property(keys::DATABASE_ZONE, "Asia/Tokyo"),
            )
            .unwrap();

        assert_eq!(user_type.mapper().database_zone(), DatabaseZone::Local);
    }

    #[test]
    fn test_jvm_keyword_selects_process_zone() {
        let user_type = PersistentNaiveDate::default()
            .configured(
                Parameters::new().with(keys::DATABASE_ZONE, "jvm"),
                &Settings::default(),
            )
            .unwrap();

        assert_eq!(user_type.mapper().database_zone(), DatabaseZone::Local);
    }

    #[test]
    fn test_unknown_zone_is_rejected() {
        let result = PersistentNaiveDate::default().configured(
            Parameters::new().with(keys::DATABASE_ZONE, "Atlantis/Capital"),
            &Settings::default(),
        );

        assert!(matches!(result, Err(UserTypeError::InvalidParameter { .. })));
    }

    #[test]
    fn test_string_form() {
        let user_type = PersistentNaiveDate::default();
        assert_eq!(user_type.format_value(&date(2024, 7, 4)), "2024-07-04");
        assert_eq!(user_type.parse_value("2024-07-04").unwrap(), date(2024, 7, 4));
    }
}

mod other_types {
    use super::*;

    #[test]
    fn test_time_of_day() {
        let user_type = PersistentNaiveTime::default();
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();

        let cached = user_type.disassemble(Some(&noon)).unwrap();
        assert_eq!(cached, vec![Some(ColumnValue::Time(noon))]);
        assert_eq!(user_type.assemble(cached).unwrap(), Some(noon));
    }

    #[test]
    fn test_zoned_date_time_application_zone_from_settings() {
        let settings = Settings::default()
            .with_property(keys::DATABASE_ZONE, "UTC")
            .with_property(keys::APPLICATION_ZONE, "Europe/Paris");
        let user_type = PersistentZonedDateTime::default()
            .configured(Parameters::new(), &settings)
            .unwrap();

        let stored = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let row = RowValues::new().with("at", Some(ColumnValue::Timestamp(stored)));

        let value: DateTime<Tz> = user_type.null_safe_get(&row, &["at"]).unwrap().unwrap();
        assert_eq!(value.timezone(), chrono_tz::Europe::Paris);
        assert_eq!(value.naive_local(), stored + Duration::hours(2));
    }

    #[test]
    fn test_instant_as_millis() {
        let user_type = PersistentInstantAsMillis::default();
        let instant = Utc.with_ymd_and_hms(2001, 9, 9, 1, 46, 40).unwrap();

        let mut params = ParameterValues::new();
        user_type.null_safe_set(&mut params, Some(&instant), 0).unwrap();
        assert_eq!(
            params.get(0),
            Some(&Some(ColumnValue::BigInt(1_000_000_000_000)))
        );
    }

    #[test]
    fn test_duration_rejects_wrong_column() {
        let user_type = PersistentDurationAsString::default();
        let row = RowValues::new().with("elapsed", Some(ColumnValue::BigInt(5)));

        let err = user_type.null_safe_get(&row, &["elapsed"]).unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn test_duration_rejects_malformed_text() {
        let user_type = PersistentDurationAsString::default();
        let row = RowValues::new().with("elapsed", Some(ColumnValue::Varchar("five".into())));

        assert!(matches!(
            user_type.null_safe_get(&row, &["elapsed"]),
            Err(UserTypeError::Domain(_))
        ));
    }
}

mod registration {
    use super::*;

    #[test]
    fn test_registers_all_types() {
        let mut registry = UserTypeRegistry::new();
        let registered = register_user_types(&mut registry, &Settings::default()).unwrap();

        assert_eq!(registered, 8);
        assert_eq!(registry.default_name_for::<NaiveDate>(), Some("PersistentNaiveDate"));
        assert_eq!(
            registry.default_name_for::<DateTime<Utc>>(),
            Some("PersistentInstantAsTimestampTz")
        );
        assert_eq!(registry.names_for::<DateTime<Utc>>().len(), 3);
    }

    #[test]
    fn test_registration_can_be_disabled() {
        let mut registry = UserTypeRegistry::new();
        let settings = Settings {
            auto_register_user_types: false,
            ..Settings::default()
        };

        assert_eq!(register_user_types(&mut registry, &settings).unwrap(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registration_applies_settings() {
        let mut registry = UserTypeRegistry::new();
        let settings = Settings::default().with_property(keys::DATABASE_ZONE, "Australia/Sydney");
        register_user_types(&mut registry, &settings).unwrap();

        let user_type = registry
            .get::<DateTime<Utc>>("PersistentInstantAsTimestamp")
            .unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let mut params = ParameterValues::new();
        user_type.null_safe_set(&mut params, Some(&instant), 0).unwrap();

        let wall_time = date(2024, 7, 1).and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(params.get(0), Some(&Some(ColumnValue::Timestamp(wall_time))));
    }

    #[test]
    fn test_registered_date_type_keeps_calendar_date() {
        let mut registry = UserTypeRegistry::new();
        let settings = Settings::default().with_property(keys::DATABASE_ZONE, "Europe/London");
        register_user_types(&mut registry, &settings).unwrap();

        let user_type = registry.default_for::<NaiveDate>().unwrap();
        let mut params = ParameterValues::new();
        user_type.null_safe_set(&mut params, Some(&date(2024, 3, 31)), 0).unwrap();
        user_type.null_safe_set(&mut params, Some(&date(2024, 4, 1)), 1).unwrap();

        assert_eq!(
            params.into_vec(),
            vec![
                (SqlType::Date, Some(ColumnValue::Date(date(2024, 3, 31)))),
                (SqlType::Date, Some(ColumnValue::Date(date(2024, 4, 1)))),
            ]
        );
    }

    #[test]
    fn test_registration_fails_on_bad_setting() {
        let mut registry = UserTypeRegistry::new();
        let settings = Settings::default().with_property(keys::DATABASE_ZONE, "Nowhere/Special");

        assert!(register_user_types(&mut registry, &settings).is_err());
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn fixed_offset_zone() -> impl Strategy<Value = DatabaseZone> {
        prop_oneof![
            Just(DatabaseZone::new(chrono_tz::UTC)),
            Just(DatabaseZone::new(chrono_tz::Asia::Tokyo)),
            Just(DatabaseZone::new(chrono_tz::Asia::Kolkata)),
            Just(DatabaseZone::new(chrono_tz::America::Phoenix)),
            Just(DatabaseZone::new(chrono_tz::Asia::Dubai)),
            Just(DatabaseZone::new(chrono_tz::Pacific::Pago_Pago)),
        ]
    }

    fn dst_zone() -> impl Strategy<Value = DatabaseZone> {
        prop_oneof![
            Just(DatabaseZone::new(chrono_tz::Europe::London)),
            Just(DatabaseZone::new(chrono_tz::Europe::Lisbon)),
            Just(DatabaseZone::new(chrono_tz::Africa::Casablanca)),
            Just(DatabaseZone::new(chrono_tz::America::Santiago)),
            Just(DatabaseZone::new(chrono_tz::Australia::Sydney)),
        ]
    }

    proptest! {
        #[test]
        fn date_survives_storage_in_fixed_offset_zones(
            days in 0i64..36_500,
            zone in fixed_offset_zone()
        ) {
            let value = date(1970, 1, 1) + Duration::days(days);
            let user_type = PersistentNaiveDate::default()
                .configured(
                    Parameters::new().with(keys::DATABASE_ZONE, zone.to_string()),
                    &Settings::default(),
                )
                .unwrap();

            let cached = user_type.disassemble(Some(&value)).unwrap();
            prop_assert_eq!(user_type.assemble(cached).unwrap(), Some(value));
        }

        #[test]
        fn stored_date_matches_domain_date_in_dst_zones(
            days in 0i64..2_000,
            zone in dst_zone()
        ) {
            let value = date(2020, 1, 1) + Duration::days(days);
            let user_type = PersistentNaiveDate::default()
                .configured(
                    Parameters::new().with(keys::DATABASE_ZONE, zone.to_string()),
                    &Settings::default(),
                )
                .unwrap();

            let cached = user_type.disassemble(Some(&value)).unwrap();
            prop_assert_eq!(cached[0].clone(), Some(ColumnValue::Date(value)));
            prop_assert_eq!(user_type.assemble(cached).unwrap(), Some(value));
        }
    }
}
