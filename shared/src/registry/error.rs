use thiserror::Error;

/// Errors that can occur while building or parsing a namespaced identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Identifier has no `namespace:name` separator
    #[error("Identifier '{identifier}' has no namespace separator ':'")]
    MissingSeparator { identifier: String },

    /// Namespace part is empty or contains the separator
    #[error("Invalid namespace '{namespace}'. Namespaces must be non-empty and must not contain ':'")]
    InvalidNamespace { namespace: String },

    /// Name part is empty
    #[error("Identifier in namespace '{namespace}' has an empty name")]
    EmptyName { namespace: String },
}

/// Errors that can occur while populating the device registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Registry is locked and cannot be modified
    #[error("DeviceRegistry is already locked and cannot be modified. DeviceRegistry.lock() has been called and no further devices may be registered")]
    AlreadyLocked,

    /// Default namespace is empty or contains the separator
    #[error("Invalid default namespace '{namespace}'. Namespaces must be non-empty and must not contain ':'")]
    InvalidDefaultNamespace { namespace: String },

    /// A prototype is already registered under this key
    #[error("A device is already registered under '{key}'")]
    DuplicateKey { key: String },
}
