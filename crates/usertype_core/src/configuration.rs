//! Per-mapping parameters and global settings
//!
//! A user type is configured in two layers. `Parameters` are supplied by an
//! individual mapping (one column of one entity); `Settings` apply to every user
//! type in the process. A parameter always wins over the matching setting.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use config::{Config, ConfigError, Environment, File, Source};
use once_cell::sync::Lazy;
use serde::Deserialize;

/// Well-known parameter and setting names
pub mod keys {
    /// Zone in which date and time columns are interpreted
    pub const DATABASE_ZONE: &str = "database_zone";
    /// Zone attached to zoned values returned to the application
    pub const APPLICATION_ZONE: &str = "application_zone";
    /// Zone the driver session renders dates and timestamps in
    pub const SESSION_ZONE: &str = "session_zone";
    /// ISO-4217 code used by single-column money types
    pub const CURRENCY_CODE: &str = "currency_code";
    /// Whether integrations register the built-in user types
    pub const AUTO_REGISTER_USER_TYPES: &str = "auto_register_user_types";
}

/// Environment variable prefix read by [`Settings::from_env`]
pub const ENV_PREFIX: &str = "USERTYPE";

/// Settings fields that are not collected into the free-form properties
const SETTINGS_FIELDS: &[&str] = &[
    keys::DATABASE_ZONE,
    keys::APPLICATION_ZONE,
    keys::SESSION_ZONE,
    keys::CURRENCY_CODE,
    keys::AUTO_REGISTER_USER_TYPES,
    "properties",
];

/// Parameters supplied by a single mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(HashMap<String, String>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, returning the parameters for chaining
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Process-wide user type settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default database zone for date and time types
    pub database_zone: Option<String>,
    /// Default zone for zoned values handed back to the application
    pub application_zone: Option<String>,
    /// Zone the driver session renders dates and timestamps in
    pub session_zone: Option<String>,
    /// Default currency for single-column money types
    pub currency_code: Option<String>,
    /// Whether the built-in user types are registered automatically
    pub auto_register_user_types: bool,
    /// Additional free-form properties, including unrecognised top-level keys
    pub properties: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_zone: None,
            application_zone: None,
            session_zone: None,
            currency_code: None,
            auto_register_user_types: true,
            properties: HashMap::new(),
        }
    }
}

static GLOBAL_SETTINGS: Lazy<RwLock<Arc<Settings>>> =
    Lazy::new(|| RwLock::new(Arc::new(Settings::default())));

impl Settings {
    /// Loads settings from `USERTYPE_*` environment variables
    ///
    /// Variables other than the named settings land in `properties`, so
    /// `USERTYPE_REPORTING_ZONE` becomes the property `reporting_zone`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_config(
            Config::builder()
                .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
                .build()?,
        )
    }

    /// Loads settings from an optional file, overlaid with the environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_config(
            Config::builder()
                .add_source(File::from(path.as_ref()).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
                .build()?,
        )
    }

    /// Deserializes settings, collecting unrecognised scalar keys into `properties`
    ///
    /// Entries of an explicit `properties` table take precedence.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let extra = config.collect()?;
        let mut settings: Settings = config.try_deserialize()?;

        for (name, value) in extra {
            if SETTINGS_FIELDS.contains(&name.as_str()) {
                continue;
            }
            if let Ok(value) = value.into_string() {
                settings.properties.entry(name).or_insert(value);
            }
        }
        Ok(settings)
    }

    /// Looks up a setting by name, falling back to the free-form properties
    pub fn property(&self, name: &str) -> Option<&str> {
        match name {
            keys::DATABASE_ZONE => self.database_zone.as_deref(),
            keys::APPLICATION_ZONE => self.application_zone.as_deref(),
            keys::SESSION_ZONE => self.session_zone.as_deref(),
            keys::CURRENCY_CODE => self.currency_code.as_deref(),
            _ => self.properties.get(name).map(String::as_str),
        }
    }

    /// Resolves a value from the mapping parameters first, then from these settings
    pub fn resolve<'a>(&'a self, parameters: &'a Parameters, name: &str) -> Option<&'a str> {
        parameters.get(name).or_else(|| self.property(name))
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match name.as_str() {
            keys::DATABASE_ZONE => self.database_zone = Some(value),
            keys::APPLICATION_ZONE => self.application_zone = Some(value),
            keys::SESSION_ZONE => self.session_zone = Some(value),
            keys::CURRENCY_CODE => self.currency_code = Some(value),
            _ => {
                self.properties.insert(name, value);
            }
        }
        self
    }

    /// Replaces the process-wide settings
    pub fn install(settings: Settings) {
        let mut guard = GLOBAL_SETTINGS
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(settings);
    }

    /// Returns the process-wide settings
    pub fn global() -> Arc<Settings> {
        GLOBAL_SETTINGS
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_wins_over_setting() {
        let settings = Settings::default().with_property(keys::DATABASE_ZONE, "UTC");
        let parameters = Parameters::new().with(keys::DATABASE_ZONE, "Europe/Paris");

        assert_eq!(
            settings.resolve(&parameters, keys::DATABASE_ZONE),
            Some("Europe/Paris")
        );
    }

    #[test]
    fn test_setting_used_when_parameter_absent() {
        let settings = Settings::default().with_property(keys::CURRENCY_CODE, "EUR");
        assert_eq!(
            settings.resolve(&Parameters::new(), keys::CURRENCY_CODE),
            Some("EUR")
        );
    }

    fn environment(vars: &[(&str, &str)]) -> Config {
        let source = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(Some(source)),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_environment_populates_named_settings_and_properties() {
        let settings = Settings::from_config(environment(&[
            ("USERTYPE_DATABASE_ZONE", "Europe/London"),
            ("USERTYPE_AUTO_REGISTER_USER_TYPES", "false"),
            ("USERTYPE_REPORTING_ZONE", "Asia/Tokyo"),
            ("USERTYPE_BATCH_SIZE", "50"),
        ]))
        .unwrap();

        assert_eq!(settings.database_zone.as_deref(), Some("Europe/London"));
        assert!(!settings.auto_register_user_types);
        assert_eq!(settings.property("reporting_zone"), Some("Asia/Tokyo"));
        assert_eq!(settings.property("batch_size"), Some("50"));
        assert_eq!(settings.property(keys::AUTO_REGISTER_USER_TYPES), None);
    }

    #[test]
    fn test_free_form_property() {
        let settings = Settings::default().with_property("custom", "value");
        assert_eq!(settings.property("custom"), Some("value"));
        assert_eq!(settings.property("absent"), None);
    }

    #[test]
    fn test_defaults_register_user_types() {
        let settings = Settings::default();
        assert!(settings.auto_register_user_types);
        assert!(settings.database_zone.is_none());
    }

    #[test]
    fn test_parameters_from_iterator() {
        let parameters: Parameters = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(parameters.get("a"), Some("1"));
        assert_eq!(parameters.iter().count(), 2);
    }
}
