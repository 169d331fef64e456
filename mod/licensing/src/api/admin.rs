//! Admin endpoints, consumed by the external administration client.
//!
//! All of these require the admin secret in the `x-admin-key` header.
//! Status overrides use the `@verb` route suffix for state transitions.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use teal_core::ServiceError;

use crate::model::DeviceStatus;
use crate::service::admin::StatusReport;
use super::{admin_key, require_field, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(view_status))
        .route("/admin/capacity", put(set_capacity))
        .route("/admin/devices/{device_id}/@activate", post(activate_device))
        .route("/admin/devices/{device_id}/@deactivate", post(deactivate_device))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetCapacityRequest {
    /// Signed so that a negative value is reported as VALIDATION_FAILED
    /// rather than a deserialization rejection.
    total_seats: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetCapacityResponse {
    success: bool,
    message: String,
    total_seats: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusChangeResponse {
    success: bool,
    message: String,
}

async fn view_status(
    State(svc): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatusReport>, ServiceError> {
    let report = svc.admin_view_status(admin_key(&headers)?)?;
    Ok(Json(report))
}

async fn set_capacity(
    State(svc): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SetCapacityRequest>,
) -> Result<Json<SetCapacityResponse>, ServiceError> {
    let total_seats = u32::try_from(body.total_seats).map_err(|_| {
        ServiceError::Validation(format!("invalid totalSeats: {}", body.total_seats))
    })?;

    let total_seats = svc.admin_set_capacity(admin_key(&headers)?, total_seats)?;
    Ok(Json(SetCapacityResponse {
        success: true,
        message: format!("Total seats set to {}", total_seats),
        total_seats,
    }))
}

async fn activate_device(
    State(svc): State<AppState>,
    Path(device_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<StatusChangeResponse>, ServiceError> {
    set_status(&svc, &headers, &device_id, DeviceStatus::Active).await
}

async fn deactivate_device(
    State(svc): State<AppState>,
    Path(device_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<StatusChangeResponse>, ServiceError> {
    set_status(&svc, &headers, &device_id, DeviceStatus::Inactive).await
}

async fn set_status(
    svc: &AppState,
    headers: &HeaderMap,
    device_id: &str,
    target: DeviceStatus,
) -> Result<Json<StatusChangeResponse>, ServiceError> {
    let device_id = require_field(device_id, "deviceId")?;
    let change = svc.admin_set_status(admin_key(headers)?, device_id, target)?;

    let verb = match target {
        DeviceStatus::Active => "activated",
        DeviceStatus::Inactive => "deactivated",
    };
    let message = if change.changed {
        format!("Device '{}' {} successfully", device_id, verb)
    } else {
        format!("Device '{}' is already {}", device_id, verb)
    };

    Ok(Json(StatusChangeResponse {
        success: true,
        message,
    }))
}
