//! User Type Registry
//!
//! This module provides a central registry of configured user types. A persistence
//! layer uses it to find out how a domain value type is stored, either by the name
//! the type was registered under or by the value type alone.
//!
//! # Usage
//!
//! ```rust,ignore
//! use usertype_core::{Settings, UserTypeRegistry};
//!
//! let mut registry = UserTypeRegistry::new();
//! domain_dateandtime::register_user_types(&mut registry, &Settings::global())?;
//!
//! let user_type = registry.default_for::<chrono::NaiveDate>().unwrap();
//! let date = user_type.null_safe_get(&row, &["birth_date"])?;
//! ```
//!
//! The first user type registered for a value type becomes its default; later
//! registrations for the same value type are reachable by name only unless
//! registered with [`UserTypeRegistry::register_as_default`].

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::UserTypeError;
use crate::user_type::UserType;

/// A registered user type, erased to its value type
struct Registration {
    value_type: TypeId,
    value_type_name: &'static str,
    user_type: Box<dyn Any + Send + Sync>,
}

/// Registry of configured user types keyed by name
#[derive(Default)]
pub struct UserTypeRegistry {
    registrations: HashMap<String, Registration>,
    defaults: HashMap<TypeId, String>,
}

impl UserTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user type under `name`
    ///
    /// Returns true if a registration with the same name was replaced.
    pub fn register<U>(&mut self, name: impl Into<String>, user_type: U) -> bool
    where
        U: UserType + 'static,
    {
        self.insert(name.into(), user_type, false)
    }

    /// Registers a user type and makes it the default for its value type
    pub fn register_as_default<U>(&mut self, name: impl Into<String>, user_type: U) -> bool
    where
        U: UserType + 'static,
    {
        self.insert(name.into(), user_type, true)
    }

    fn insert<U>(&mut self, name: String, user_type: U, as_default: bool) -> bool
    where
        U: UserType + 'static,
    {
        let value_type = TypeId::of::<U::Value>();
        let value_type_name = user_type.returned_type();
        let shared: Arc<dyn UserType<Value = U::Value>> = Arc::new(user_type);

        let previous = self.registrations.insert(
            name.clone(),
            Registration {
                value_type,
                value_type_name,
                user_type: Box::new(shared),
            },
        );
        let replaced = previous.is_some();

        if let Some(previous) = previous.filter(|p| p.value_type != value_type) {
            self.reassign_default(previous.value_type, &name);
        }

        if as_default || !self.defaults.contains_key(&value_type) {
            self.defaults.insert(value_type, name.clone());
        }

        if replaced {
            warn!(name = %name, "Replaced existing user type registration");
        } else {
            debug!(name = %name, value_type = value_type_name, "Registered user type");
        }
        replaced
    }

    /// Moves the default for `value_type` off `name` once `name` handles another type
    fn reassign_default(&mut self, value_type: TypeId, name: &str) {
        if self.defaults.get(&value_type).map(String::as_str) != Some(name) {
            return;
        }

        let successor = self
            .registrations
            .iter()
            .filter(|(_, r)| r.value_type == value_type)
            .map(|(n, _)| n)
            .min()
            .cloned();

        match successor {
            Some(successor) => {
                debug!(name = %successor, "Reassigned default user type");
                self.defaults.insert(value_type, successor);
            }
            None => {
                self.defaults.remove(&value_type);
            }
        }
    }

    /// Looks up a user type by name, checking it handles values of type `V`
    pub fn get<V: 'static>(&self, name: &str) -> Result<Arc<dyn UserType<Value = V>>, UserTypeError> {
        let registration = self
            .registrations
            .get(name)
            .ok_or_else(|| UserTypeError::UnknownUserType(name.to_string()))?;

        registration
            .user_type
            .downcast_ref::<Arc<dyn UserType<Value = V>>>()
            .cloned()
            .ok_or_else(|| {
                UserTypeError::conversion(
                    std::any::type_name::<V>(),
                    format!(
                        "user type {} handles {}",
                        name, registration.value_type_name
                    ),
                )
            })
    }

    /// Returns the default user type for values of type `V`
    pub fn default_for<V: 'static>(&self) -> Option<Arc<dyn UserType<Value = V>>> {
        let name = self.defaults.get(&TypeId::of::<V>())?;
        self.get::<V>(name).ok()
    }

    /// Returns the name of the default user type for values of type `V`
    pub fn default_name_for<V: 'static>(&self) -> Option<&str> {
        self.defaults.get(&TypeId::of::<V>()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registrations.contains_key(name)
    }

    /// Returns the registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.registrations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the names of every user type handling values of type `V`
    pub fn names_for<V: 'static>(&self) -> Vec<&str> {
        let value_type = TypeId::of::<V>();
        let mut names: Vec<&str> = self
            .registrations
            .iter()
            .filter(|(_, r)| r.value_type == value_type)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl std::fmt::Debug for UserTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserTypeRegistry")
            .field("names", &self.names())
            .finish()
    }
}
