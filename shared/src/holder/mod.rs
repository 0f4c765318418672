pub mod error;
pub mod holder;
pub mod holder_config;
mod persistence;
mod sync;
