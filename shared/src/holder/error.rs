use thiserror::Error;

use crate::compound::error::CompoundError;

/// Errors that can occur while loading a holder from its persistent record.
///
/// An identifier that no longer resolves is not an error: it is logged and
/// the holder loads empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Device payload didn't match what the device expects
    #[error("Persisted payload of device '{key}' could not be read: {source}")]
    Payload {
        key: String,
        #[source]
        source: CompoundError,
    },
}
