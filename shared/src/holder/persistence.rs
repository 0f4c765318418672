use log::error;

use crate::{
    compound::Compound,
    constants::{IDENTIFIER_KEY, PAYLOAD_KEY, POSITION_X_KEY, POSITION_Y_KEY, POSITION_Z_KEY},
    registry::device_registry::DeviceRegistry,
    world::block_pos::BlockPos,
};

use super::{error::PersistenceError, holder::Holder};

impl Holder {
    /// Writes the holder's position and, if a device is bound, its
    /// identifier and persistent payload. A missing identifier means no
    /// device.
    pub fn write_persistent(&self, record: &mut Compound) {
        let position = self.position();
        record.put(POSITION_X_KEY, position.x);
        record.put(POSITION_Y_KEY, position.y);
        record.put(POSITION_Z_KEY, position.z);

        if let Some(device) = self.device() {
            record.put(IDENTIFIER_KEY, device.key().to_string());
            let mut payload = Compound::new();
            device.write_persistent(&mut payload);
            record.put(PAYLOAD_KEY, payload);
        }
    }

    pub fn to_persistent(&self) -> Compound {
        let mut record = Compound::new();
        self.write_persistent(&mut record);
        record
    }

    /// Restores the holder from a persistent record.
    ///
    /// Identifiers saved before device ids were namespaced are migrated
    /// through the registry. An identifier that resolves to nothing is
    /// logged and leaves the holder empty; it never fails the load. No
    /// world side effects fire: the device's own load hooks run instead.
    pub fn read_persistent(
        &mut self,
        registry: &DeviceRegistry,
        record: &Compound,
    ) -> Result<(), PersistenceError> {
        if let (Some(x), Some(y), Some(z)) = (
            record.get_int(POSITION_X_KEY),
            record.get_int(POSITION_Y_KEY),
            record.get_int(POSITION_Z_KEY),
        ) {
            self.set_position(BlockPos::new(x, y, z));
        }

        let Some(identifier) = record.get_string(IDENTIFIER_KEY) else {
            self.unbind();
            return Ok(());
        };

        let prototype = registry
            .resolve_identifier(identifier)
            .and_then(|key| registry.get(&key));
        let Some(prototype) = prototype else {
            error!(
                "Failed to load device with invalid identifier '{}' at {}",
                identifier,
                self.position()
            );
            self.unbind();
            return Ok(());
        };

        let empty = Compound::new();
        let payload = record.get_compound(PAYLOAD_KEY).unwrap_or(&empty);

        let device = self.bind_detached(prototype);
        if let Err(source) = device.read_persistent(payload) {
            let key = device.key().to_string();
            self.unbind();
            return Err(PersistenceError::Payload { key, source });
        }
        device.on_post_load();

        Ok(())
    }
}
