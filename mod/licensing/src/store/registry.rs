use std::sync::Arc;

use teal_core::ServiceError;
use teal_kv::KVStore;

use crate::model::{DeviceRecord, DeviceStatus};

const DEVICE_PREFIX: &str = "licensing/devices/";

fn device_key(device_id: &str) -> String {
    format!("{}{}", DEVICE_PREFIX, device_id)
}

/// DeviceRegistry — durable mapping from device id to its record.
///
/// Each call is individually atomic (one KV transaction). The
/// count-then-write sequence of an admission decision spans several calls
/// and is serialized by the service's admission lock, not here.
pub struct DeviceRegistry {
    kv: Arc<dyn KVStore>,
}

impl DeviceRegistry {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    /// Look up a device record. Returns None if the device never activated.
    pub fn find(&self, device_id: &str) -> Result<Option<DeviceRecord>, ServiceError> {
        match self.kv.get(&device_key(device_id)) {
            Ok(Some(raw)) => serde_json::from_slice(&raw).map(Some).map_err(|e| {
                ServiceError::Internal(format!("corrupt device record '{}': {}", device_id, e))
            }),
            Ok(None) => Ok(None),
            Err(e) => Err(ServiceError::Storage(e.to_string())),
        }
    }

    /// Insert a new record. Fails with Conflict if the device id is taken.
    pub fn insert(&self, record: &DeviceRecord) -> Result<(), ServiceError> {
        if self.find(&record.device_id)?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "device '{}' already registered",
                record.device_id
            )));
        }
        self.write(record)
    }

    /// Overwrite an existing record. Fails with NotFound if absent.
    pub fn update(&self, record: &DeviceRecord) -> Result<(), ServiceError> {
        if self.find(&record.device_id)?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "device '{}' not found",
                record.device_id
            )));
        }
        self.write(record)
    }

    /// Count devices currently holding a seat.
    pub fn count_active(&self) -> Result<u32, ServiceError> {
        let mut count = 0;
        for record in self.all()? {
            if record.status == DeviceStatus::Active {
                count += 1;
            }
        }
        Ok(count)
    }

    /// All device records, sorted by device id.
    pub fn all(&self) -> Result<Vec<DeviceRecord>, ServiceError> {
        let entries = self
            .kv
            .scan(DEVICE_PREFIX)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let mut records = Vec::with_capacity(entries.len());
        for (key, raw) in entries {
            let record = serde_json::from_slice(&raw).map_err(|e| {
                ServiceError::Internal(format!("corrupt device record at '{}': {}", key, e))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    fn write(&self, record: &DeviceRecord) -> Result<(), ServiceError> {
        let raw = serde_json::to_vec(record)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.kv
            .set(&device_key(&record.device_id), &raw)
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teal_kv::RedbStore;

    fn open_registry() -> (tempfile::TempDir, DeviceRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let kv = RedbStore::open(&dir.path().join("test.redb")).unwrap();
        (dir, DeviceRegistry::new(Arc::new(kv)))
    }

    fn record(id: &str, status: DeviceStatus) -> DeviceRecord {
        DeviceRecord {
            device_id: id.into(),
            owner: "alice".into(),
            host: "alice-desktop".into(),
            activated_at: "2025-03-01T09:30:00+00:00".into(),
            status,
        }
    }

    #[test]
    fn insert_then_find() {
        let (_dir, reg) = open_registry();
        assert!(reg.find("d1").unwrap().is_none());

        reg.insert(&record("d1", DeviceStatus::Active)).unwrap();
        let found = reg.find("d1").unwrap().unwrap();
        assert_eq!(found.owner, "alice");
        assert!(found.is_active());
    }

    #[test]
    fn double_insert_conflicts() {
        let (_dir, reg) = open_registry();
        reg.insert(&record("d1", DeviceStatus::Active)).unwrap();

        let err = reg.insert(&record("d1", DeviceStatus::Active)).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn update_requires_existing() {
        let (_dir, reg) = open_registry();
        let err = reg.update(&record("ghost", DeviceStatus::Inactive)).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        reg.insert(&record("d1", DeviceStatus::Active)).unwrap();
        reg.update(&record("d1", DeviceStatus::Inactive)).unwrap();
        assert!(!reg.find("d1").unwrap().unwrap().is_active());
    }

    #[test]
    fn count_active_ignores_inactive() {
        let (_dir, reg) = open_registry();
        reg.insert(&record("d1", DeviceStatus::Active)).unwrap();
        reg.insert(&record("d2", DeviceStatus::Inactive)).unwrap();
        reg.insert(&record("d3", DeviceStatus::Active)).unwrap();

        assert_eq!(reg.count_active().unwrap(), 2);
        assert_eq!(reg.all().unwrap().len(), 3);
    }
}
