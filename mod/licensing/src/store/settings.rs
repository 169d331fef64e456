use std::sync::Arc;

use teal_core::ServiceError;
use teal_kv::KVStore;
use tracing::info;

use crate::model::Settings;

const SETTINGS_KEY: &str = "licensing/settings";

/// SettingsStore — the Capacity Store. Holds the single Settings record.
///
/// Does not enforce the seat invariant; shrinking capacity below current
/// usage is a valid operation and admission enforcement lives in the
/// service layer.
pub struct SettingsStore {
    kv: Arc<dyn KVStore>,
}

impl SettingsStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    /// Load settings, creating the record with the given defaults if this
    /// is the first boot.
    pub fn load_or_init(&self, defaults: Settings) -> Result<Settings, ServiceError> {
        match self.kv.get(SETTINGS_KEY) {
            Ok(Some(raw)) => serde_json::from_slice(&raw)
                .map_err(|e| ServiceError::Internal(format!("corrupt settings record: {}", e))),
            Ok(None) => {
                self.write(&defaults)?;
                info!("initialized settings with {} total seats", defaults.total_seats);
                Ok(defaults)
            }
            Err(e) => Err(ServiceError::Storage(e.to_string())),
        }
    }

    pub fn get(&self) -> Result<Settings, ServiceError> {
        let raw = self
            .kv
            .get(SETTINGS_KEY)
            .map_err(|e| ServiceError::Storage(e.to_string()))?
            .ok_or_else(|| ServiceError::Internal("settings record missing".into()))?;
        serde_json::from_slice(&raw)
            .map_err(|e| ServiceError::Internal(format!("corrupt settings record: {}", e)))
    }

    pub fn set_total_seats(&self, total_seats: u32) -> Result<Settings, ServiceError> {
        let mut settings = self.get()?;
        settings.total_seats = total_seats;
        self.write(&settings)?;
        Ok(settings)
    }

    fn write(&self, settings: &Settings) -> Result<(), ServiceError> {
        let raw = serde_json::to_vec(settings)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.kv
            .set(SETTINGS_KEY, &raw)
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teal_kv::RedbStore;

    fn open_store() -> (tempfile::TempDir, SettingsStore) {
        let dir = tempfile::tempdir().unwrap();
        let kv = RedbStore::open(&dir.path().join("test.redb")).unwrap();
        (dir, SettingsStore::new(Arc::new(kv)))
    }

    fn defaults() -> Settings {
        Settings {
            master_key: "mk".into(),
            total_seats: 5,
        }
    }

    #[test]
    fn first_boot_creates_defaults() {
        let (_dir, store) = open_store();
        let s = store.load_or_init(defaults()).unwrap();
        assert_eq!(s.total_seats, 5);
        assert_eq!(store.get().unwrap(), s);
    }

    #[test]
    fn load_or_init_keeps_existing() {
        let (_dir, store) = open_store();
        store.load_or_init(defaults()).unwrap();
        store.set_total_seats(9).unwrap();

        // A second boot must not reset the stored record.
        let s = store.load_or_init(defaults()).unwrap();
        assert_eq!(s.total_seats, 9);
    }

    #[test]
    fn set_total_seats_persists() {
        let (_dir, store) = open_store();
        store.load_or_init(defaults()).unwrap();
        let s = store.set_total_seats(0).unwrap();
        assert_eq!(s.total_seats, 0);
        assert_eq!(store.get().unwrap().total_seats, 0);
    }
}
