use log::warn;

use metatile_serde::{BitReader, BitWrite, BitWriter, Serde};

use crate::{
    constants::INITIAL_SYNC_DISCRIMINATOR,
    registry::{device_registry::DeviceRegistry, registry_key::RegistryKey},
    sync::{
        delta_record::DeltaRecord, error::SyncError, initial_sync_packet::InitialSyncPacket,
        update_packet::UpdatePacket,
    },
    world::holder_world::HolderWorld,
};

use super::holder::Holder;

impl Holder {
    // Initial sync

    /// Writes the snapshot a fresh observer needs: whether a device is
    /// bound, then its identifier and its own initial-sync state.
    pub fn write_initial_sync(&self, writer: &mut dyn BitWrite) {
        let device = self.device();
        device.map(|device| device.key().to_string()).ser(writer);
        if let Some(device) = device {
            device.write_initial_sync(writer);
        }
    }

    pub fn initial_sync_packet(&self) -> InitialSyncPacket {
        let mut writer = BitWriter::new();
        self.write_initial_sync(&mut writer);
        InitialSyncPacket::new(self.position(), writer.to_bytes())
    }

    /// Applies a snapshot written by `write_initial_sync`. An absent device
    /// leaves whatever is bound in place.
    pub fn read_initial_sync(
        &mut self,
        world: &mut dyn HolderWorld,
        registry: &DeviceRegistry,
        reader: &mut BitReader,
    ) -> Result<(), SyncError> {
        if let Some(identifier) = Option::<String>::de(reader)? {
            self.read_device_snapshot(world, registry, identifier, reader)?;
        }
        Ok(())
    }

    pub fn receive_initial_sync_packet(
        &mut self,
        world: &mut dyn HolderWorld,
        registry: &DeviceRegistry,
        packet: &InitialSyncPacket,
    ) -> Result<(), SyncError> {
        if packet.position != self.position() {
            warn!(
                "Initial sync for {} applied to holder at {}",
                packet.position,
                self.position()
            );
        }
        self.read_initial_sync(world, registry, &mut packet.reader())
    }

    // the device's own initial sync follows the identifier
    fn read_device_snapshot(
        &mut self,
        world: &mut dyn HolderWorld,
        registry: &DeviceRegistry,
        identifier: String,
        reader: &mut BitReader,
    ) -> Result<(), SyncError> {
        let max = self.config().max_identifier_length;
        if identifier.len() > max {
            return Err(SyncError::IdentifierTooLong {
                length: identifier.len(),
                max,
            });
        }

        let key = RegistryKey::parse(&identifier)?;
        let prototype = registry
            .get(&key)
            .ok_or(SyncError::UnknownDevice { key: identifier })?;

        self.try_bind(world, prototype, |device| device.read_initial_sync(reader))?;

        self.schedule_render_update(world);
        self.request_light_update();
        Ok(())
    }

    // Incremental records

    /// Applies one received record. The reserved discriminator replaces the
    /// bound device with the one in the snapshot; every other record goes to
    /// the bound device, and is dropped if there is none.
    pub fn receive_custom_data(
        &mut self,
        world: &mut dyn HolderWorld,
        registry: &DeviceRegistry,
        discriminator: i32,
        reader: &mut BitReader,
    ) -> Result<(), SyncError> {
        if discriminator == INITIAL_SYNC_DISCRIMINATOR {
            let identifier = String::de(reader)?;
            return self.read_device_snapshot(world, registry, identifier, reader);
        }

        // a record can outrun the snapshot that binds its device
        if let Some(device) = self.device_mut() {
            device.receive_custom_data(discriminator, reader)?;
        }
        Ok(())
    }

    /// Applies records in the order they were queued, stopping at the first
    /// that fails
    pub fn apply_deltas(
        &mut self,
        world: &mut dyn HolderWorld,
        registry: &DeviceRegistry,
        records: &[DeltaRecord],
    ) -> Result<(), SyncError> {
        for record in records {
            self.receive_custom_data(world, registry, record.discriminator(), &mut record.reader())?;
        }
        Ok(())
    }

    pub fn receive_update_packet(
        &mut self,
        world: &mut dyn HolderWorld,
        registry: &DeviceRegistry,
        packet: &UpdatePacket,
    ) -> Result<(), SyncError> {
        self.apply_deltas(world, registry, &packet.records)
    }
}
