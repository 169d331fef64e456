use serde::{Deserialize, Serialize};

/// Device lifecycle status.
///
/// A device that has never activated has no record at all; once a record
/// exists it only ever moves between these two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    /// Holds a seat.
    Active,
    /// Seat released; record kept for history.
    Inactive,
}

/// DeviceRecord — one device that has activated at least once.
/// PK = device_id (opaque, caller-supplied).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    /// Device identifier — primary key. Treated as opaque; no format assumed.
    pub device_id: String,

    /// User the device was activated for.
    pub owner: String,

    /// Hostname reported at activation.
    pub host: String,

    /// When the device last transitioned to Active (RFC 3339).
    pub activated_at: String,

    /// Current lifecycle status.
    pub status: DeviceStatus,
}

impl DeviceRecord {
    pub fn is_active(&self) -> bool {
        self.status == DeviceStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_record_json_roundtrip() {
        let d = DeviceRecord {
            device_id: "9f3a-office-pc".into(),
            owner: "alice".into(),
            host: "alice-desktop".into(),
            activated_at: "2025-03-01T09:30:00+00:00".into(),
            status: DeviceStatus::Active,
        };

        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"deviceId\":\"9f3a-office-pc\""));
        assert!(json.contains("\"status\":\"ACTIVE\""));

        let back: DeviceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&DeviceStatus::Inactive).unwrap(),
            "\"INACTIVE\""
        );
    }
}
