/// Devices and the registry shared by every test
use std::any::Any;

use metatile_shared::{
    BitReader, BitWrite, Compound, CompoundError, Device, DeviceContext, DeviceRegistry,
    HolderRef, RegistryKey, Serde, SerdeErr,
};

pub const DEFAULT_NAMESPACE: &str = "gregtech";

/// Incremental record carrying a machine's progress as an i32
pub const PROGRESS_DISCRIMINATOR: i32 = 1;
/// Incremental record carrying a machine's label as a String
pub const LABEL_DISCRIMINATOR: i32 = 2;

// Machine

/// An opaque device with two pieces of synced state.
///
/// When `auto_progress` is set, every tick advances `progress` and queues
/// a progress record.
pub struct Machine {
    key: RegistryKey,
    holder: Option<HolderRef>,
    pub progress: i32,
    pub label: String,
    pub auto_progress: bool,
    pub observed_timers: Vec<u64>,
    pub post_loads: u32,
}

impl Machine {
    pub fn prototype(key: &str) -> Self {
        Self {
            key: RegistryKey::parse(key).expect("test keys are valid"),
            holder: None,
            progress: 0,
            label: String::new(),
            auto_progress: false,
            observed_timers: Vec::new(),
            post_loads: 0,
        }
    }

    pub fn with_auto_progress(mut self) -> Self {
        self.auto_progress = true;
        self
    }
}

impl Device for Machine {
    fn key(&self) -> &RegistryKey {
        &self.key
    }

    fn create_instance(&self, holder: HolderRef) -> Box<dyn Device> {
        Box::new(Self {
            key: self.key.clone(),
            holder: Some(holder),
            progress: 0,
            label: String::new(),
            auto_progress: self.auto_progress,
            observed_timers: Vec::new(),
            post_loads: 0,
        })
    }

    fn holder(&self) -> Option<HolderRef> {
        self.holder
    }

    fn update(&mut self, context: &mut DeviceContext) {
        self.observed_timers.push(context.timer());
        if self.auto_progress && !context.is_remote() {
            self.progress += 1;
            let progress = self.progress;
            context.write_custom_data(PROGRESS_DISCRIMINATOR, |writer| progress.ser(writer));
            context.mark_dirty();
        }
    }

    fn write_persistent(&self, payload: &mut Compound) {
        payload.put("progress", self.progress);
        payload.put("label", self.label.as_str());
    }

    fn read_persistent(&mut self, payload: &Compound) -> Result<(), CompoundError> {
        self.progress = payload.try_get_int("progress")?;
        self.label = payload.get_string("label").unwrap_or_default().to_string();
        Ok(())
    }

    fn on_post_load(&mut self) {
        self.post_loads += 1;
    }

    fn write_initial_sync(&self, writer: &mut dyn BitWrite) {
        self.progress.ser(writer);
        self.label.ser(writer);
    }

    fn read_initial_sync(&mut self, reader: &mut BitReader) -> Result<(), SerdeErr> {
        self.progress = i32::de(reader)?;
        self.label = String::de(reader)?;
        Ok(())
    }

    fn receive_custom_data(
        &mut self,
        discriminator: i32,
        reader: &mut BitReader,
    ) -> Result<(), SerdeErr> {
        match discriminator {
            PROGRESS_DISCRIMINATOR => self.progress = i32::de(reader)?,
            LABEL_DISCRIMINATOR => self.label = String::de(reader)?,
            _ => return Err(SerdeErr),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// Lamp

/// A see-through device with a single on/off flag
pub struct Lamp {
    key: RegistryKey,
    holder: Option<HolderRef>,
    pub lit: bool,
}

impl Lamp {
    pub fn prototype(key: &str) -> Self {
        Self {
            key: RegistryKey::parse(key).expect("test keys are valid"),
            holder: None,
            lit: false,
        }
    }
}

impl Device for Lamp {
    fn key(&self) -> &RegistryKey {
        &self.key
    }

    fn create_instance(&self, holder: HolderRef) -> Box<dyn Device> {
        Box::new(Self {
            key: self.key.clone(),
            holder: Some(holder),
            lit: false,
        })
    }

    fn holder(&self) -> Option<HolderRef> {
        self.holder
    }

    fn is_opaque(&self) -> bool {
        false
    }

    fn write_persistent(&self, payload: &mut Compound) {
        payload.put("lit", self.lit);
    }

    fn read_persistent(&mut self, payload: &Compound) -> Result<(), CompoundError> {
        self.lit = payload.get_bool("lit").unwrap_or(false);
        Ok(())
    }

    fn write_initial_sync(&self, writer: &mut dyn BitWrite) {
        self.lit.ser(writer);
    }

    fn read_initial_sync(&mut self, reader: &mut BitReader) -> Result<(), SerdeErr> {
        self.lit = bool::de(reader)?;
        Ok(())
    }

    fn receive_custom_data(
        &mut self,
        _discriminator: i32,
        reader: &mut BitReader,
    ) -> Result<(), SerdeErr> {
        self.lit = bool::de(reader)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Locked registry with `gregtech:machine`, `gregtech:ticker` and
/// `mymod:lamp`, defaulting to the `gregtech` namespace
pub fn registry() -> DeviceRegistry {
    let mut registry = DeviceRegistry::new(DEFAULT_NAMESPACE);
    registry
        .add_device(Machine::prototype("gregtech:machine"))
        .add_device(Machine::prototype("gregtech:ticker").with_auto_progress())
        .add_device(Lamp::prototype("mymod:lamp"));
    registry.lock();
    registry
}

pub fn machine_key() -> RegistryKey {
    RegistryKey::parse("gregtech:machine").expect("test keys are valid")
}

pub fn ticker_key() -> RegistryKey {
    RegistryKey::parse("gregtech:ticker").expect("test keys are valid")
}

pub fn lamp_key() -> RegistryKey {
    RegistryKey::parse("mymod:lamp").expect("test keys are valid")
}
