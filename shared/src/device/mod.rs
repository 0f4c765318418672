pub mod device;
pub mod device_context;
pub mod holder_ref;

pub use device::Device;
