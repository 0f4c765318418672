use log::debug;

use metatile_serde::{BitWrite, Serde};

use crate::{
    constants::INITIAL_SYNC_DISCRIMINATOR,
    device::{device_context::DeviceContext, holder_ref::HolderRef, Device},
    sync::{
        delta_queue::DeltaQueue, delta_record::DeltaRecord, error::SyncError,
        update_packet::UpdatePacket,
    },
    world::{block_pos::BlockPos, holder_world::HolderWorld},
};

use super::holder_config::HolderConfig;

/// The world-resident container that carries at most one device at a
/// position, and keeps that device's state flowing to storage and to
/// observers.
pub struct Holder {
    position: BlockPos,
    config: HolderConfig,
    device: Option<Box<dyn Device>>,
    deltas: DeltaQueue,
    needs_light_update: bool,
    timer: u64,
    invalid: bool,
}

impl Holder {
    pub fn new(position: BlockPos) -> Self {
        Self::with_config(position, HolderConfig::default())
    }

    pub fn with_config(position: BlockPos, config: HolderConfig) -> Self {
        Self {
            position,
            config,
            device: None,
            deltas: DeltaQueue::new(),
            needs_light_update: false,
            timer: 0,
            invalid: false,
        }
    }

    pub fn position(&self) -> BlockPos {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: BlockPos) {
        self.position = position;
    }

    pub fn config(&self) -> &HolderConfig {
        &self.config
    }

    /// Handle a device bound here uses to refer back to this holder
    pub fn handle(&self) -> HolderRef {
        HolderRef::new(self.position)
    }

    // Device access

    pub fn has_device(&self) -> bool {
        self.device.is_some()
    }

    pub fn device(&self) -> Option<&dyn Device> {
        self.device.as_deref()
    }

    pub fn device_mut(&mut self) -> Option<&mut (dyn Device + 'static)> {
        self.device.as_deref_mut()
    }

    /// The bound device, if it is a `D`
    pub fn device_as<D: Device>(&self) -> Option<&D> {
        self.device
            .as_ref()
            .and_then(|device| device.as_any().downcast_ref::<D>())
    }

    pub fn device_as_mut<D: Device>(&mut self) -> Option<&mut D> {
        self.device
            .as_mut()
            .and_then(|device| device.as_any_mut().downcast_mut::<D>())
    }

    // Binding

    /// Binds a fresh copy of `prototype` to this holder, replacing any bound
    /// device, and returns the new instance.
    ///
    /// On the authoritative side of a world this also makes the change
    /// visible: the block's opacity follows the device, observers are sent a
    /// full initial-sync record, lighting is rechecked on the next tick,
    /// neighbours are told to re-evaluate, and the holder is marked for
    /// saving.
    pub fn bind(
        &mut self,
        world: &mut dyn HolderWorld,
        prototype: &dyn Device,
    ) -> &mut (dyn Device + 'static) {
        let instance = self.instantiate(prototype);
        if !world.is_remote() {
            self.announce_device(world, &*instance);
        }
        self.install(instance)
    }

    /// Like `bind`, but only once `fill` has accepted the fresh instance. If
    /// `fill` fails the instance is discarded and the holder is left as it
    /// was.
    pub(crate) fn try_bind<E>(
        &mut self,
        world: &mut dyn HolderWorld,
        prototype: &dyn Device,
        fill: impl FnOnce(&mut dyn Device) -> Result<(), E>,
    ) -> Result<&mut (dyn Device + 'static), E> {
        let mut instance = self.instantiate(prototype);
        fill(&mut *instance)?;
        if !world.is_remote() {
            self.announce_device(world, &*instance);
        }
        Ok(self.install(instance))
    }

    /// Binds a fresh copy of `prototype` without touching any world, for
    /// holders not yet placed and for loading from storage
    pub fn bind_detached(&mut self, prototype: &dyn Device) -> &mut (dyn Device + 'static) {
        let instance = self.instantiate(prototype);
        self.install(instance)
    }

    pub(crate) fn unbind(&mut self) {
        self.device = None;
    }

    // Panics if the instance does not report this holder back
    fn instantiate(&self, prototype: &dyn Device) -> Box<dyn Device> {
        let instance = prototype.create_instance(self.handle());
        assert_eq!(
            instance.holder(),
            Some(self.handle()),
            "Device::create_instance() must bind the new instance to the holder it is given"
        );
        instance
    }

    fn install(&mut self, instance: Box<dyn Device>) -> &mut (dyn Device + 'static) {
        debug!("Bound device {} at {}", instance.key(), self.position);
        // the previous device, if any, is dropped here
        let device = self.device.insert(instance);
        &mut **device
    }

    fn announce_device(&mut self, world: &mut dyn HolderWorld, device: &dyn Device) {
        let position = self.position;

        let opaque = device.is_opaque();
        if world.is_block_opaque(&position) != opaque {
            world.set_block_opaque(&position, opaque);
        }

        let identifier = device.key().to_string();
        self.deltas.push(INITIAL_SYNC_DISCRIMINATOR, |writer| {
            identifier.ser(writer);
            device.write_initial_sync(writer);
        });
        world.notify_block_update(&position);

        self.needs_light_update = true;
        world.neighbor_changed(&position);
        world.mark_dirty(&position);
    }

    // Incremental records

    /// Queues an incremental record for observers and tells the world this
    /// block has data to sync
    ///
    /// # Panics
    ///
    /// Panics on the reserved initial-sync discriminator.
    /// Consider using `try_write_custom_data` for non-panicking error handling.
    pub fn write_custom_data(
        &mut self,
        world: &mut dyn HolderWorld,
        discriminator: i32,
        writer: impl FnOnce(&mut dyn BitWrite),
    ) {
        if let Err(error) = self.try_write_custom_data(world, discriminator, writer) {
            panic!("{}", error);
        }
    }

    pub fn try_write_custom_data(
        &mut self,
        world: &mut dyn HolderWorld,
        discriminator: i32,
        writer: impl FnOnce(&mut dyn BitWrite),
    ) -> Result<(), SyncError> {
        self.deltas.try_write(discriminator, writer)?;
        world.notify_block_update(&self.position);
        Ok(())
    }

    pub fn pending_deltas(&self) -> &DeltaQueue {
        &self.deltas
    }

    /// Takes every queued record, in queue order. Call once per outgoing
    /// update packet.
    pub fn flush_deltas(&mut self) -> Vec<DeltaRecord> {
        let records = self.deltas.drain();
        if !records.is_empty() {
            debug!(
                "Flushed {} records from holder at {}",
                records.len(),
                self.position
            );
        }
        records
    }

    pub fn take_update_packet(&mut self) -> UpdatePacket {
        UpdatePacket::new(self.position, self.flush_deltas())
    }

    // Lifecycle

    /// Runs one tick: the device's update, then any owed lighting recheck,
    /// then the timer advances. The timer only moves after the device has
    /// run, so a device's first tick sees 0.
    pub fn update(&mut self, world: &mut dyn HolderWorld) {
        if let Some(device) = self.device.as_mut() {
            let mut context =
                DeviceContext::new(HolderRef::new(self.position), self.timer, &mut self.deltas, world);
            device.update(&mut context);
        }

        if self.needs_light_update {
            world.check_light(&self.position);
            self.needs_light_update = false;
        }

        self.timer += 1;
    }

    pub fn timer(&self) -> u64 {
        self.timer
    }

    pub fn needs_light_update(&self) -> bool {
        self.needs_light_update
    }

    pub(crate) fn request_light_update(&mut self) {
        self.needs_light_update = true;
    }

    /// Valid while the engine hasn't invalidated it and a device is bound
    pub fn is_valid(&self) -> bool {
        !self.invalid && self.device.is_some()
    }

    pub fn invalidate(&mut self) {
        self.invalid = true;
    }

    pub fn validate(&mut self) {
        self.invalid = false;
    }

    /// A holder outlives changes to its block's state; it is only replaced
    /// when a different kind of block takes its place
    pub fn should_refresh<B: PartialEq + ?Sized>(old_block: &B, new_block: &B) -> bool {
        old_block != new_block
    }

    // World pass-throughs for device code

    pub fn is_remote(&self, world: &dyn HolderWorld) -> bool {
        world.is_remote()
    }

    pub fn mark_as_dirty(&self, world: &mut dyn HolderWorld) {
        world.mark_dirty(&self.position);
    }

    /// Tells neighbouring blocks that this block's state changed
    pub fn notify_block_update(&self, world: &mut dyn HolderWorld) {
        world.notify_neighbors_of_state_change(&self.position);
    }

    /// Re-renders the cube of blocks around this holder
    pub fn schedule_render_update(&self, world: &mut dyn HolderWorld) {
        let radius = self.config.render_update_radius;
        let min = self.position.offset(-radius, -radius, -radius);
        let max = self.position.offset(radius, radius, radius);
        world.mark_range_for_render_update(&min, &max);
    }
}
