use std::path::PathBuf;

/// Default seat pool size used when the server boots with no stored settings
/// and no `TEAL_TOTAL_SEATS` override.
pub const DEFAULT_TOTAL_SEATS: u32 = 50;

// Development fallbacks only. Production deployments must set the
// environment variables; see `Secrets::from_env`.
const DEV_MASTER_KEY: &str = "ChangeThisInProductionMasterKey";
const DEV_ADMIN_KEY: &str = "ChangeThisInProductionAdminKey";

/// Common CLI configuration shared by all services.
///
/// The service binary parses these from command-line arguments or environment
/// variables, then passes them to storage layer initialization.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory for durable state.
    pub data_dir: Option<PathBuf>,

    /// Path to the redb database file.
    /// Defaults to `{data_dir}/data.redb` if not specified.
    pub db_path: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_path: None,
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the redb database path, falling back to `{data_dir}/data.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath("data.redb"))
    }

    fn resolve_data_subpath(&self, name: &str) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| d.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}

/// Shared secrets, supplied by the environment at process start and compared
/// by exact equality. No hashing or rotation.
#[derive(Debug, Clone)]
pub struct Secrets {
    /// Proves a device activation request may consume a seat.
    pub master_key: String,

    /// Proves a request may manage capacity or override device status.
    pub admin_key: String,
}

impl Secrets {
    /// Load secrets from `TEAL_MASTER_KEY` / `TEAL_ADMIN_KEY`, falling back
    /// to development defaults when unset.
    pub fn from_env() -> Self {
        Self {
            master_key: std::env::var("TEAL_MASTER_KEY")
                .unwrap_or_else(|_| DEV_MASTER_KEY.to_string()),
            admin_key: std::env::var("TEAL_ADMIN_KEY")
                .unwrap_or_else(|_| DEV_ADMIN_KEY.to_string()),
        }
    }

    /// True if either secret is still a development fallback.
    pub fn is_development(&self) -> bool {
        self.master_key == DEV_MASTER_KEY || self.admin_key == DEV_ADMIN_KEY
    }
}

/// Initial seat pool size: `TEAL_TOTAL_SEATS` or [`DEFAULT_TOTAL_SEATS`].
pub fn initial_total_seats() -> u32 {
    std::env::var("TEAL_TOTAL_SEATS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TOTAL_SEATS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_db_path_default() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            ..Default::default()
        };
        assert_eq!(config.resolve_db_path(), PathBuf::from("/data/data.redb"));
    }

    #[test]
    fn test_resolve_db_path_explicit() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            db_path: Some(PathBuf::from("/elsewhere/licenses.redb")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_db_path(),
            PathBuf::from("/elsewhere/licenses.redb")
        );
    }

    #[test]
    fn test_dev_secrets_flagged() {
        let secrets = Secrets {
            master_key: DEV_MASTER_KEY.into(),
            admin_key: "real-admin-key".into(),
        };
        assert!(secrets.is_development());

        let secrets = Secrets {
            master_key: "real-master-key".into(),
            admin_key: "real-admin-key".into(),
        };
        assert!(!secrets.is_development());
    }
}
