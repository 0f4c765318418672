use std::any::Any;

use metatile_serde::{BitReader, BitWrite, SerdeErr};

use crate::{
    compound::{error::CompoundError, Compound},
    registry::registry_key::RegistryKey,
};

use super::{device_context::DeviceContext, holder_ref::HolderRef};

/// A pluggable logical device carried by a holder.
///
/// Registered instances act as prototypes: a holder never binds the
/// prototype itself, it binds the fresh instance returned by
/// `create_instance`. Each device kind decides how its own state is
/// persisted and synced; the holder treats every payload as opaque.
pub trait Device: Any + Send + Sync {
    /// Key this device kind is registered under
    fn key(&self) -> &RegistryKey;

    /// Manufactures a fresh instance of this kind, owned by `holder`.
    ///
    /// The returned instance must report `Some(holder)` from `holder()`;
    /// records it queues and world effects it requests are routed through
    /// that reference.
    ///
    /// # Panics
    ///
    /// Binding panics if the instance reports any other holder.
    fn create_instance(&self, holder: HolderRef) -> Box<dyn Device>;

    /// Holder this instance is bound to. None for prototypes.
    fn holder(&self) -> Option<HolderRef>;

    /// Whether the block carrying this device hides the blocks behind it
    fn is_opaque(&self) -> bool {
        true
    }

    /// Runs once per holder tick
    fn update(&mut self, _context: &mut DeviceContext) {}

    // Persistence

    fn write_persistent(&self, payload: &mut Compound);

    fn read_persistent(&mut self, payload: &Compound) -> Result<(), CompoundError>;

    /// Runs after `read_persistent`, once the whole payload is applied
    fn on_post_load(&mut self) {}

    // Sync

    /// State a fresh observer needs to render and interact with this device
    fn write_initial_sync(&self, writer: &mut dyn BitWrite);

    fn read_initial_sync(&mut self, reader: &mut BitReader) -> Result<(), SerdeErr>;

    /// Applies an incremental record this device queued on the authoritative
    /// side. `discriminator` is never the reserved initial-sync value.
    fn receive_custom_data(
        &mut self,
        discriminator: i32,
        reader: &mut BitReader,
    ) -> Result<(), SerdeErr>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
