//! Registration of the money and currency user types

use tracing::{debug, info};
use usertype_core::configuration::keys;
use usertype_core::{Configurable, Parameters, Settings, UserTypeError, UserTypeRegistry};

use crate::{
    PersistentBigMoneyAmountAndCurrency, PersistentBigMoneyMinorAmountAndCurrencyAsInteger,
    PersistentCurrencyUnit, PersistentCurrencyUnitAsInteger, PersistentMoneyAmount,
    PersistentMoneyAmountAndCurrency, PersistentMoneyMinorAmountAndCurrency,
};

/// Registers the money and currency user types, configured from `settings`
///
/// `PersistentMoneyAmount` has no currency column, so it is only registered when a
/// `currency_code` setting is present. Returns the number of registered types.
pub fn register_user_types(
    registry: &mut UserTypeRegistry,
    settings: &Settings,
) -> Result<usize, UserTypeError> {
    if !settings.auto_register_user_types {
        debug!("Automatic registration disabled, skipping money user types");
        return Ok(0);
    }

    let before = registry.len();

    registry.register(
        "PersistentBigMoneyMinorAmountAndCurrencyAsInteger",
        PersistentBigMoneyMinorAmountAndCurrencyAsInteger::default()
            .configured(Parameters::new(), settings)?,
    );
    registry.register(
        "PersistentBigMoneyAmountAndCurrency",
        PersistentBigMoneyAmountAndCurrency::default().configured(Parameters::new(), settings)?,
    );
    registry.register(
        "PersistentMoneyAmountAndCurrency",
        PersistentMoneyAmountAndCurrency::default().configured(Parameters::new(), settings)?,
    );
    registry.register(
        "PersistentMoneyMinorAmountAndCurrency",
        PersistentMoneyMinorAmountAndCurrency::default().configured(Parameters::new(), settings)?,
    );
    registry.register(
        "PersistentCurrencyUnit",
        PersistentCurrencyUnit::default().configured(Parameters::new(), settings)?,
    );
    registry.register(
        "PersistentCurrencyUnitAsInteger",
        PersistentCurrencyUnitAsInteger::default().configured(Parameters::new(), settings)?,
    );

    if settings.property(keys::CURRENCY_CODE).is_some() {
        registry.register(
            "PersistentMoneyAmount",
            PersistentMoneyAmount::default().configured(Parameters::new(), settings)?,
        );
    } else {
        debug!("No currency_code setting, skipping PersistentMoneyAmount");
    }

    let registered = registry.len() - before;
    info!(registered, "Registered money user types");
    Ok(registered)
}
