pub mod admin;
pub mod admission;

use std::sync::{Arc, Mutex, MutexGuard};

use teal_core::ServiceError;
use teal_kv::KVStore;

use crate::model::Settings;
use crate::store::{DeviceRegistry, SettingsStore};

/// Licensing service — holds the capacity store, the device registry and
/// the admission lock, and provides all business logic.
///
/// Every capacity-affecting transition (first activation, reactivation,
/// admin activation) must hold `admission` across its count-then-write
/// sequence; two such transitions never interleave. Seat release and reads
/// rely on the registry's per-record atomicity only.
pub struct LicensingService {
    pub(crate) settings: SettingsStore,
    pub(crate) registry: DeviceRegistry,
    pub(crate) admin_key: String,
    admission: Mutex<()>,
}

impl LicensingService {
    /// Build the service over a KV store, creating the settings record on
    /// first boot.
    pub fn new(
        kv: Arc<dyn KVStore>,
        master_key: String,
        admin_key: String,
        initial_total_seats: u32,
    ) -> Result<Self, ServiceError> {
        let settings = SettingsStore::new(Arc::clone(&kv));
        settings.load_or_init(Settings {
            master_key,
            total_seats: initial_total_seats,
        })?;

        Ok(Self {
            settings,
            registry: DeviceRegistry::new(kv),
            admin_key,
            admission: Mutex::new(()),
        })
    }

    pub(crate) fn admission_guard(&self) -> Result<MutexGuard<'_, ()>, ServiceError> {
        self.admission
            .lock()
            .map_err(|_| ServiceError::Internal("admission lock poisoned".into()))
    }

    pub(crate) fn require_admin(&self, admin_key: &str) -> Result<(), ServiceError> {
        if admin_key != self.admin_key {
            return Err(ServiceError::Unauthorized("invalid admin key".into()));
        }
        Ok(())
    }
}
