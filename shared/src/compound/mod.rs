mod compound;
pub mod error;
mod tag;

pub use compound::Compound;
pub use tag::{Tag, TagType, MAX_DEPTH};
