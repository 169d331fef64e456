//! `teald` — the Teal license server binary.
//!
//! Usage:
//!   teald --data-dir <dir> [--db <path>] [--listen <addr>]
//!
//! Secrets come from the environment: `TEAL_MASTER_KEY` (device
//! activation), `TEAL_ADMIN_KEY` (administration). `TEAL_TOTAL_SEATS`
//! sets the initial seat pool on first boot.

mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use teal_core::{config, Module, Secrets, ServiceConfig};
use tracing::{info, warn};

/// Teal license server.
#[derive(Parser, Debug)]
#[command(name = "teald", about = "Teal license server")]
struct Cli {
    /// Directory for durable state.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Path to the redb database file (defaults to {data-dir}/data.redb).
    #[arg(long = "db")]
    db_path: Option<PathBuf>,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let service_config = ServiceConfig {
        data_dir: cli.data_dir,
        db_path: cli.db_path,
        listen: cli.listen,
    };

    let secrets = Secrets::from_env();
    if secrets.is_development() {
        warn!("running with development secrets; set TEAL_MASTER_KEY and TEAL_ADMIN_KEY");
    }

    if let Some(dir) = &service_config.data_dir {
        std::fs::create_dir_all(dir)?;
    }

    // Initialize the embedded store.
    let db_path = service_config.resolve_db_path();
    let kv: Arc<dyn teal_kv::KVStore> = Arc::new(
        teal_kv::RedbStore::open(&db_path)
            .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?,
    );

    let licensing_module = licensing::LicensingModule::new(
        licensing::service::LicensingService::new(
            kv,
            secrets.master_key,
            secrets.admin_key,
            config::initial_total_seats(),
        )
        .map_err(|e| anyhow::anyhow!("failed to initialize licensing: {}", e))?,
    );
    info!("Licensing module initialized (db: {})", db_path.display());

    let module_routes = vec![(licensing_module.name().to_string(), licensing_module.routes())];
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&service_config.listen).await?;
    info!("Teal license server listening on {}", service_config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
