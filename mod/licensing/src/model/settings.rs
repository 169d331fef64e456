use serde::{Deserialize, Serialize};

/// Settings — the singleton capacity record.
///
/// Created once on first boot, then mutated only by the authenticated
/// capacity-change operation. The master key is a static shared secret
/// compared by equality; there is no derivation or rotation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Secret a device must present to consume a seat.
    pub master_key: String,

    /// Size of the seat pool. May be set below the current active count;
    /// that only blocks further admissions, it never evicts.
    pub total_seats: u32,
}
