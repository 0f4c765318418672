use std::collections::HashMap;

use log::warn;

use crate::device::Device;

use super::{
    error::RegistryError,
    migration::LegacyIdResolver,
    registry_key::RegistryKey,
};

/// Maps registry keys onto device prototypes.
///
/// Populated at startup, then locked. Locking closes the key set and builds
/// the legacy-identifier probe list; the registry is read-only from then on.
pub struct DeviceRegistry {
    default_namespace: String,
    prototypes: HashMap<RegistryKey, Box<dyn Device>>,
    keys: Vec<RegistryKey>,
    legacy_resolver: Option<LegacyIdResolver>,
}

impl DeviceRegistry {
    /// # Panics
    ///
    /// Panics if `default_namespace` is empty or contains ':'.
    /// Consider using `try_new` for non-panicking error handling.
    pub fn new(default_namespace: &str) -> Self {
        match Self::try_new(default_namespace) {
            Ok(registry) => registry,
            Err(error) => panic!("{}", error),
        }
    }

    pub fn try_new(default_namespace: &str) -> Result<Self, RegistryError> {
        // validate through the key constructor so both agree on what a namespace is
        if RegistryKey::new(default_namespace, "_").is_err() {
            return Err(RegistryError::InvalidDefaultNamespace {
                namespace: default_namespace.to_string(),
            });
        }

        Ok(Self {
            default_namespace: default_namespace.to_string(),
            prototypes: HashMap::new(),
            keys: Vec::new(),
            legacy_resolver: None,
        })
    }

    /// Registers a prototype under its own key
    ///
    /// # Panics
    ///
    /// Panics if the registry is locked or the key is taken.
    /// Consider using `try_add_device` for non-panicking error handling.
    pub fn add_device<D: Device>(&mut self, prototype: D) -> &mut Self {
        if let Err(error) = self.try_add_device(prototype) {
            panic!("{}", error);
        }
        self
    }

    pub fn try_add_device<D: Device>(&mut self, prototype: D) -> Result<&mut Self, RegistryError> {
        self.try_check_lock()?;

        let key = prototype.key().clone();
        if self.prototypes.contains_key(&key) {
            return Err(RegistryError::DuplicateKey {
                key: key.to_string(),
            });
        }

        self.keys.push(key.clone());
        self.prototypes.insert(key, Box::new(prototype));
        Ok(self)
    }

    /// Closes the registry and builds the legacy namespace probe list
    ///
    /// # Panics
    ///
    /// Panics if already locked.
    /// Consider using `try_lock` for non-panicking error handling.
    pub fn lock(&mut self) {
        if let Err(error) = self.try_lock() {
            panic!("{}", error);
        }
    }

    pub fn try_lock(&mut self) -> Result<(), RegistryError> {
        self.try_check_lock()?;
        self.legacy_resolver = Some(LegacyIdResolver::new(&self.default_namespace, &self.keys));
        Ok(())
    }

    /// Returns Err if the registry is locked
    pub fn try_check_lock(&self) -> Result<(), RegistryError> {
        if self.is_locked() {
            Err(RegistryError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    pub fn is_locked(&self) -> bool {
        self.legacy_resolver.is_some()
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    pub fn get(&self, key: &RegistryKey) -> Option<&dyn Device> {
        self.prototypes.get(key).map(|prototype| prototype.as_ref())
    }

    pub fn contains_key(&self, key: &RegistryKey) -> bool {
        self.prototypes.contains_key(key)
    }

    /// Registered keys, in registration order
    pub fn keys(&self) -> &[RegistryKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Resolves a bare, pre-namespacing identifier. The default namespace
    /// takes precedence over every other namespace.
    pub fn resolve_legacy(&self, bare_name: &str) -> Option<RegistryKey> {
        let contains = |key: &RegistryKey| self.prototypes.contains_key(key);
        match &self.legacy_resolver {
            Some(resolver) => resolver.resolve(&self.default_namespace, bare_name, contains),
            None => {
                warn!(
                    "Resolving legacy device id '{}' against an unlocked DeviceRegistry; namespaces are recomputed on every call until lock() is called",
                    bare_name
                );
                LegacyIdResolver::new(&self.default_namespace, &self.keys).resolve(
                    &self.default_namespace,
                    bare_name,
                    contains,
                )
            }
        }
    }

    /// Resolves a persisted identifier: bare names go through legacy
    /// migration, namespaced ones are parsed directly. Returns None if the
    /// identifier is malformed or no registered key matches.
    pub fn resolve_identifier(&self, identifier: &str) -> Option<RegistryKey> {
        if RegistryKey::is_legacy(identifier) {
            return self.resolve_legacy(identifier);
        }
        let key = RegistryKey::parse(identifier).ok()?;
        self.contains_key(&key).then_some(key)
    }
}
