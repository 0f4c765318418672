use std::{error::Error, fmt};

/// Returned when a bit stream cannot be decoded: it ended early, or it holds
/// a value that can't be represented by the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerdeErr;

impl fmt::Display for SerdeErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Serde Error: bit stream is truncated or malformed")
    }
}

impl Error for SerdeErr {}
