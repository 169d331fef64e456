use serde::Serialize;
use teal_core::{now_rfc3339, ServiceError};
use tracing::info;

use crate::model::{DeviceRecord, DeviceStatus};
use super::LicensingService;

/// Outcome of a granted activation request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivationGrant {
    pub message: String,
    pub seats_remaining: u32,
}

impl LicensingService {
    /// Activate a device, consuming a seat if it does not already hold one.
    ///
    /// An already-active device succeeds idempotently without consuming a
    /// second seat; a deactivated device reactivates under the same capacity
    /// check as a first activation, refreshing owner/host/timestamp in place.
    pub fn activate(
        &self,
        license_key: &str,
        device_id: &str,
        owner: &str,
        host: &str,
    ) -> Result<ActivationGrant, ServiceError> {
        // Exclusive section: count active, compare to capacity, then write.
        // Settings are read under the lock so a concurrent capacity change
        // is either fully before or fully after this decision.
        let _guard = self.admission_guard()?;

        let settings = self.settings.get()?;
        if license_key != settings.master_key {
            return Err(ServiceError::Unauthorized("invalid license key".into()));
        }

        let active_count = self.registry.count_active()?;
        let seats_remaining = |count: u32| settings.total_seats.saturating_sub(count);

        match self.registry.find(device_id)? {
            Some(existing) if existing.is_active() => Ok(ActivationGrant {
                message: "License already active on this device".into(),
                seats_remaining: seats_remaining(active_count),
            }),
            Some(mut existing) => {
                self.check_capacity(active_count, settings.total_seats)?;

                existing.owner = owner.to_string();
                existing.host = host.to_string();
                existing.activated_at = now_rfc3339();
                existing.status = DeviceStatus::Active;
                self.registry.update(&existing)?;

                info!(device_id, owner, "device reactivated");
                Ok(ActivationGrant {
                    message: "License reactivated successfully".into(),
                    seats_remaining: seats_remaining(active_count + 1),
                })
            }
            None => {
                self.check_capacity(active_count, settings.total_seats)?;

                self.registry.insert(&DeviceRecord {
                    device_id: device_id.to_string(),
                    owner: owner.to_string(),
                    host: host.to_string(),
                    activated_at: now_rfc3339(),
                    status: DeviceStatus::Active,
                })?;

                info!(device_id, owner, "device activated");
                Ok(ActivationGrant {
                    message: "License activated successfully".into(),
                    seats_remaining: seats_remaining(active_count + 1),
                })
            }
        }
    }

    /// Check whether a device currently holds a valid license. Read-only;
    /// never consumes or releases a seat.
    pub fn check(&self, device_id: &str) -> Result<DeviceRecord, ServiceError> {
        match self.registry.find(device_id)? {
            Some(record) if record.is_active() => Ok(record),
            Some(_) => Err(ServiceError::Revoked(
                "this device's license has been deactivated".into(),
            )),
            None => Err(ServiceError::NotFound(
                "license not found for this device".into(),
            )),
        }
    }

    pub(crate) fn check_capacity(
        &self,
        active_count: u32,
        total_seats: u32,
    ) -> Result<(), ServiceError> {
        if active_count >= total_seats {
            return Err(ServiceError::CapacityExceeded(format!(
                "all {} licenses are currently in use; contact your administrator to acquire more",
                total_seats
            )));
        }
        Ok(())
    }
}
