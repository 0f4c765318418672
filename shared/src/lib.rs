//! # Metatile Shared
//! Binds pluggable logical devices to world holders, and keeps each
//! device's state consistent across storage, initial views by observers,
//! and incremental updates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use metatile_serde::{
    BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr,
    SignedInteger, SignedVariableInteger, UnsignedInteger, UnsignedVariableInteger,
};

mod compound;
mod constants;
mod device;
mod holder;
mod registry;
mod sync;
mod world;

pub use compound::{error::CompoundError, Compound, Tag, TagType, MAX_DEPTH};
pub use constants::{
    DEFAULT_MAX_IDENTIFIER_LENGTH, DEFAULT_RENDER_UPDATE_RADIUS, IDENTIFIER_KEY,
    INITIAL_SYNC_DISCRIMINATOR, PAYLOAD_KEY, POSITION_X_KEY, POSITION_Y_KEY, POSITION_Z_KEY,
};
pub use device::{device_context::DeviceContext, holder_ref::HolderRef, Device};
pub use holder::{error::PersistenceError, holder::Holder, holder_config::HolderConfig};
pub use registry::{
    device_registry::DeviceRegistry,
    error::{KeyError, RegistryError},
    migration::LegacyIdResolver,
    registry_key::{RegistryKey, NAMESPACE_SEPARATOR},
};
pub use sync::{
    delta_queue::DeltaQueue, delta_record::DeltaRecord, error::SyncError,
    initial_sync_packet::InitialSyncPacket, update_packet::UpdatePacket,
};
pub use world::{block_pos::BlockPos, holder_world::HolderWorld};
