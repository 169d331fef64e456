pub mod config;
pub mod error;
pub mod module;
pub mod types;

pub use config::{Secrets, ServiceConfig};
pub use error::ServiceError;
pub use module::Module;
pub use types::now_rfc3339;
