use metatile_serde::BitWrite;

use crate::{
    sync::{delta_queue::DeltaQueue, error::SyncError},
    world::{block_pos::BlockPos, holder_world::HolderWorld},
};

use super::holder_ref::HolderRef;

/// What a device may touch while its holder ticks it
pub struct DeviceContext<'a> {
    holder: HolderRef,
    timer: u64,
    deltas: &'a mut DeltaQueue,
    world: &'a mut dyn HolderWorld,
}

impl<'a> DeviceContext<'a> {
    pub(crate) fn new(
        holder: HolderRef,
        timer: u64,
        deltas: &'a mut DeltaQueue,
        world: &'a mut dyn HolderWorld,
    ) -> Self {
        Self {
            holder,
            timer,
            deltas,
            world,
        }
    }

    pub fn holder(&self) -> HolderRef {
        self.holder
    }

    pub fn position(&self) -> BlockPos {
        self.holder.position()
    }

    /// Ticks the holder has run before this one. The first tick a fresh
    /// holder runs sees 0.
    pub fn timer(&self) -> u64 {
        self.timer
    }

    pub fn is_remote(&self) -> bool {
        self.world.is_remote()
    }

    /// Queues an incremental record for observers
    ///
    /// # Panics
    ///
    /// Panics on the reserved initial-sync discriminator.
    /// Consider using `try_write_custom_data` for non-panicking error handling.
    pub fn write_custom_data(&mut self, discriminator: i32, writer: impl FnOnce(&mut dyn BitWrite)) {
        if let Err(error) = self.try_write_custom_data(discriminator, writer) {
            panic!("{}", error);
        }
    }

    pub fn try_write_custom_data(
        &mut self,
        discriminator: i32,
        writer: impl FnOnce(&mut dyn BitWrite),
    ) -> Result<(), SyncError> {
        self.deltas.try_write(discriminator, writer)?;
        self.world.notify_block_update(&self.holder.position());
        Ok(())
    }

    /// Flags the holder as needing to be saved
    pub fn mark_dirty(&mut self) {
        self.world.mark_dirty(&self.holder.position());
    }

    /// Tells neighbouring blocks that this block's state changed
    pub fn notify_block_update(&mut self) {
        self.world
            .notify_neighbors_of_state_change(&self.holder.position());
    }
}
