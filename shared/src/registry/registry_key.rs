use std::{fmt, str::FromStr};

use super::error::KeyError;

pub const NAMESPACE_SEPARATOR: char = ':';

/// A `namespace:name` pair identifying a registered device kind
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegistryKey {
    namespace: String,
    name: String,
}

impl RegistryKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self, KeyError> {
        let namespace = namespace.into();
        let name = name.into();

        if namespace.is_empty() || namespace.contains(NAMESPACE_SEPARATOR) {
            return Err(KeyError::InvalidNamespace { namespace });
        }
        if name.is_empty() {
            return Err(KeyError::EmptyName { namespace });
        }

        Ok(Self { namespace, name })
    }

    /// Parses a fully namespaced identifier, splitting at the first `:`
    pub fn parse(identifier: &str) -> Result<Self, KeyError> {
        let Some((namespace, name)) = identifier.split_once(NAMESPACE_SEPARATOR) else {
            return Err(KeyError::MissingSeparator {
                identifier: identifier.to_string(),
            });
        };
        Self::new(namespace, name)
    }

    /// Whether `identifier` predates namespacing and needs migration
    pub fn is_legacy(identifier: &str) -> bool {
        !identifier.contains(NAMESPACE_SEPARATOR)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, NAMESPACE_SEPARATOR, self.name)
    }
}

impl FromStr for RegistryKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
