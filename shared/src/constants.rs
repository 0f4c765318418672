/// Discriminator reserved for a full initial-sync record: an identifier
/// string followed by the device's initial-sync payload.
pub const INITIAL_SYNC_DISCRIMINATOR: i32 = -1;

/// Longest identifier accepted off the wire, in bytes
pub const DEFAULT_MAX_IDENTIFIER_LENGTH: usize = i16::MAX as usize;

/// Half-width of the cube re-rendered around a holder after a sync
pub const DEFAULT_RENDER_UPDATE_RADIUS: i32 = 1;

// Persistent record keys
pub const IDENTIFIER_KEY: &str = "identifier";
pub const PAYLOAD_KEY: &str = "payload";
pub const POSITION_X_KEY: &str = "x";
pub const POSITION_Y_KEY: &str = "y";
pub const POSITION_Z_KEY: &str = "z";
