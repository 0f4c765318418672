use thiserror::Error;

use super::tag::TagType;

/// Errors that can occur while reading typed values out of a Compound
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompoundError {
    /// Required key is absent
    #[error("Compound has no entry '{key}'")]
    MissingKey { key: String },

    /// Entry exists but holds a different tag type
    #[error("Compound entry '{key}' is a {found:?} tag, expected {expected:?}")]
    WrongType {
        key: String,
        expected: TagType,
        found: TagType,
    },

    /// Entry holds a value outside the range the reader accepts
    #[error("Compound entry '{key}' is out of range: {reason}")]
    OutOfRange { key: String, reason: String },
}
