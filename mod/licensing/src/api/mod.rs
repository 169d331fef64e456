pub mod activation;
pub mod admin;

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::Router;

use teal_core::ServiceError;

use crate::service::LicensingService;

/// Shared application state.
pub type AppState = Arc<LicensingService>;

/// Header carrying the admin secret on admin endpoints.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Build the licensing API router, to be nested under the module prefix.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/v1", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(activation::routes())
        .merge(admin::routes())
}

/// Extract the admin secret from the request headers.
pub(crate) fn admin_key(headers: &HeaderMap) -> Result<&str, ServiceError> {
    headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            ServiceError::Unauthorized(format!("missing {} header", ADMIN_KEY_HEADER))
        })
}

/// Require a non-empty request field.
pub(crate) fn require_field<'a>(value: &'a str, name: &str) -> Result<&'a str, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation(format!("missing {}", name)));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_key_extraction() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            admin_key(&headers).unwrap_err(),
            ServiceError::Unauthorized(_)
        ));

        headers.insert(ADMIN_KEY_HEADER, "sekrit".parse().unwrap());
        assert_eq!(admin_key(&headers).unwrap(), "sekrit");
    }

    #[test]
    fn require_field_rejects_blank() {
        assert!(require_field("  ", "deviceId").is_err());
        assert_eq!(require_field(" d1 ", "deviceId").unwrap(), "d1");
    }
}
