//! Registration of the date and time user types

use tracing::{debug, info};
use usertype_core::{Configurable, Parameters, Settings, UserTypeError, UserTypeRegistry};

use crate::{
    PersistentDurationAsString, PersistentInstantAsMillis, PersistentInstantAsTimestamp,
    PersistentInstantAsTimestampTz, PersistentNaiveDate, PersistentNaiveDateTime,
    PersistentNaiveTime, PersistentZonedDateTime,
};

/// Registers every date and time user type, configured from `settings`
///
/// The first type registered for a value type becomes its default, so instants
/// default to TIMESTAMPTZ columns. Returns the number of registered types, which
/// is zero when automatic registration is disabled.
pub fn register_user_types(
    registry: &mut UserTypeRegistry,
    settings: &Settings,
) -> Result<usize, UserTypeError> {
    if !settings.auto_register_user_types {
        debug!("Automatic registration disabled, skipping date and time user types");
        return Ok(0);
    }

    let before = registry.len();

    registry.register(
        "PersistentNaiveDate",
        PersistentNaiveDate::default().configured(Parameters::new(), settings)?,
    );
    registry.register(
        "PersistentNaiveDateTime",
        PersistentNaiveDateTime::default().configured(Parameters::new(), settings)?,
    );
    registry.register(
        "PersistentNaiveTime",
        PersistentNaiveTime::default().configured(Parameters::new(), settings)?,
    );
    registry.register(
        "PersistentZonedDateTime",
        PersistentZonedDateTime::default().configured(Parameters::new(), settings)?,
    );
    registry.register(
        "PersistentInstantAsTimestampTz",
        PersistentInstantAsTimestampTz::default().configured(Parameters::new(), settings)?,
    );
    registry.register(
        "PersistentInstantAsTimestamp",
        PersistentInstantAsTimestamp::default().configured(Parameters::new(), settings)?,
    );
    registry.register(
        "PersistentInstantAsMillis",
        PersistentInstantAsMillis::default().configured(Parameters::new(), settings)?,
    );
    registry.register(
        "PersistentDurationAsString",
        PersistentDurationAsString::default().configured(Parameters::new(), settings)?,
    );

    let registered = registry.len() - before;
    info!(registered, "Registered date and time user types");
    Ok(registered)
}
