pub mod device_registry;
pub mod error;
pub mod migration;
pub mod registry_key;
