use std::collections::HashSet;

use super::registry_key::RegistryKey;

/// Maps legacy bare identifiers (saved before device ids were namespaced)
/// onto registry keys.
///
/// The probe list holds every namespace seen among the registered keys,
/// minus the default namespace, in order of first registration. It is built
/// once when the registry is locked and never rebuilt, so it assumes the
/// set of namespaces is closed by then.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyIdResolver {
    probe_namespaces: Vec<String>,
}

impl LegacyIdResolver {
    pub fn new<'k>(default_namespace: &str, keys: impl IntoIterator<Item = &'k RegistryKey>) -> Self {
        let mut seen = HashSet::new();
        let mut probe_namespaces = Vec::new();

        for key in keys {
            let namespace = key.namespace();
            if namespace == default_namespace {
                continue;
            }
            if seen.insert(namespace) {
                probe_namespaces.push(namespace.to_string());
            }
        }

        Self { probe_namespaces }
    }

    pub fn probe_namespaces(&self) -> &[String] {
        &self.probe_namespaces
    }

    /// Resolves `bare_name`, trying the default namespace before any other.
    /// `contains` answers whether a key is registered.
    pub fn resolve(
        &self,
        default_namespace: &str,
        bare_name: &str,
        contains: impl Fn(&RegistryKey) -> bool,
    ) -> Option<RegistryKey> {
        let default_key = RegistryKey::new(default_namespace, bare_name).ok()?;
        if contains(&default_key) {
            return Some(default_key);
        }

        self.probe_namespaces
            .iter()
            .filter_map(|namespace| RegistryKey::new(namespace.as_str(), bare_name).ok())
            .find(|key| contains(key))
    }
}
