use thiserror::Error;

use metatile_serde::SerdeErr;

use crate::registry::error::KeyError;

/// Errors raised while encoding or applying sync data.
///
/// All of these are structural: they mean the payload can't be trusted and
/// are handed back to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Payload is truncated or garbled
    #[error("Malformed sync payload: {0}")]
    Malformed(#[from] SerdeErr),

    /// Synced identifier isn't a valid `namespace:name` key
    #[error("Synced device identifier is invalid: {0}")]
    InvalidKey(#[from] KeyError),

    /// Synced identifier isn't registered on this side
    #[error("Synced device '{key}' is not registered. Both sides must register the same devices")]
    UnknownDevice { key: String },

    /// Synced identifier exceeds the configured maximum
    #[error("Synced device identifier is {length} bytes long, the maximum is {max}")]
    IdentifierTooLong { length: usize, max: usize },

    /// Device code tried to queue a record under the reserved discriminator
    #[error("Discriminator {discriminator} is reserved for initial-sync records")]
    ReservedDiscriminator { discriminator: i32 },
}
