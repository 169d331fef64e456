use std::collections::BTreeMap;

use serde::Serialize;
use teal_core::ServiceError;
use tracing::info;

use crate::model::{DeviceRecord, DeviceStatus};
use super::LicensingService;

/// Result of an admin status override.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub device_id: String,
    pub status: DeviceStatus,
    /// False when the device was already in the requested status.
    pub changed: bool,
}

/// Snapshot of the seat pool for the admin client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub total_seats: u32,
    pub active_count: u32,
    pub seats_remaining: u32,
    /// All device records ever registered, keyed by device id.
    pub devices: BTreeMap<String, DeviceRecord>,
}

impl LicensingService {
    /// Force a device into the given status.
    ///
    /// Only a client activation can create a record; an override of an
    /// unregistered device is NotFound. Deactivation always succeeds
    /// (releasing a seat cannot oversubscribe); activation takes the
    /// admission lock and is subject to the capacity check.
    pub fn admin_set_status(
        &self,
        admin_key: &str,
        device_id: &str,
        target: DeviceStatus,
    ) -> Result<StatusChange, ServiceError> {
        self.require_admin(admin_key)?;

        let guard = match target {
            DeviceStatus::Active => Some(self.admission_guard()?),
            DeviceStatus::Inactive => None,
        };

        let mut record = self
            .registry
            .find(device_id)?
            .ok_or_else(|| ServiceError::NotFound(format!("device '{}' not found", device_id)))?;

        if record.status == target {
            return Ok(StatusChange {
                device_id: device_id.to_string(),
                status: target,
                changed: false,
            });
        }

        if guard.is_some() {
            let settings = self.settings.get()?;
            self.check_capacity(self.registry.count_active()?, settings.total_seats)?;
        }

        record.status = target;
        self.registry.update(&record)?;

        info!(device_id, ?target, "admin status override");
        Ok(StatusChange {
            device_id: device_id.to_string(),
            status: target,
            changed: true,
        })
    }

    /// Resize the seat pool. Shrinking below the current active count is
    /// accepted; already-active devices stay active and further admissions
    /// are blocked until attrition brings the count back under the cap.
    pub fn admin_set_capacity(
        &self,
        admin_key: &str,
        total_seats: u32,
    ) -> Result<u32, ServiceError> {
        self.require_admin(admin_key)?;
        // Serialize with in-flight admission decisions.
        let _guard = self.admission_guard()?;
        let settings = self.settings.set_total_seats(total_seats)?;
        info!(total_seats, "capacity changed");
        Ok(settings.total_seats)
    }

    /// Consistent snapshot of capacity, usage and all device records.
    pub fn admin_view_status(&self, admin_key: &str) -> Result<StatusReport, ServiceError> {
        self.require_admin(admin_key)?;

        let settings = self.settings.get()?;
        let devices = self.registry.all()?;
        let active_count = devices.iter().filter(|d| d.is_active()).count() as u32;

        Ok(StatusReport {
            total_seats: settings.total_seats,
            active_count,
            seats_remaining: settings.total_seats.saturating_sub(active_count),
            devices: devices
                .into_iter()
                .map(|d| (d.device_id.clone(), d))
                .collect(),
        })
    }
}
