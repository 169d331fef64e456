//! Client-facing endpoints: POST /v1/activate, POST /v1/check.
//!
//! These are the only endpoints a licensed product calls. Payloads are
//! validated here; the service layer never sees malformed input.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use teal_core::ServiceError;

use super::{require_field, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/activate", post(activate))
        .route("/check", post(check))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivateRequest {
    license_key: String,
    device_id: String,
    owner: String,
    host: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivateResponse {
    success: bool,
    message: String,
    seats_remaining: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckRequest {
    device_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckResponse {
    success: bool,
    message: String,
}

async fn activate(
    State(svc): State<AppState>,
    Json(body): Json<ActivateRequest>,
) -> Result<Json<ActivateResponse>, ServiceError> {
    let license_key = require_field(&body.license_key, "licenseKey")?;
    let device_id = require_field(&body.device_id, "deviceId")?;
    let owner = require_field(&body.owner, "owner")?;
    let host = require_field(&body.host, "host")?;

    let grant = svc.activate(license_key, device_id, owner, host)?;
    Ok(Json(ActivateResponse {
        success: true,
        message: grant.message,
        seats_remaining: grant.seats_remaining,
    }))
}

async fn check(
    State(svc): State<AppState>,
    Json(body): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ServiceError> {
    let device_id = require_field(&body.device_id, "deviceId")?;

    svc.check(device_id)?;
    Ok(Json(CheckResponse {
        success: true,
        message: "License active".into(),
    }))
}
