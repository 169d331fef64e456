pub mod api;
pub mod model;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::Router;
use teal_core::Module;

use service::LicensingService;

/// Licensing module — per-device seat admission and administration.
pub struct LicensingModule {
    service: Arc<LicensingService>,
}

impl LicensingModule {
    pub fn new(service: LicensingService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl Module for LicensingModule {
    fn name(&self) -> &str {
        "licensing"
    }

    fn routes(&self) -> Router {
        api::router(self.service.clone())
    }
}
