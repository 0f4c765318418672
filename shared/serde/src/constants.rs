/// Upper bound on the number of elements a length-prefixed container may
/// declare. Anything larger is treated as a garbled stream.
pub const MAX_CONTAINER_LENGTH: usize = 1 << 24;
