pub mod registry;
pub mod settings;

pub use registry::DeviceRegistry;
pub use settings::SettingsStore;
