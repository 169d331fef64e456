pub mod device;
pub mod settings;

pub use device::{DeviceRecord, DeviceStatus};
pub use settings::Settings;
