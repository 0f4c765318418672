use std::default::Default;

use crate::constants::{DEFAULT_MAX_IDENTIFIER_LENGTH, DEFAULT_RENDER_UPDATE_RADIUS};

/// Contains Config properties used by a Holder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HolderConfig {
    /// Longest device identifier accepted from initial-sync data, in bytes.
    /// Longer ones are rejected as malformed.
    pub max_identifier_length: usize,
    /// Half-width of the cube of blocks re-rendered after the holder
    /// receives a device snapshot
    pub render_update_radius: i32,
}

impl Default for HolderConfig {
    fn default() -> Self {
        Self {
            max_identifier_length: DEFAULT_MAX_IDENTIFIER_LENGTH,
            render_update_radius: DEFAULT_RENDER_UPDATE_RADIUS,
        }
    }
}
