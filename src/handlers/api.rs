use crate::app_state::{format_uptime, AppState};
use crate::error::{AppError, AppResult};
use axum::{body::Bytes, extract::State, response::Json};
use rand::Rng;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

pub const HELLO_MESSAGE: &str = "Hey the API works!";

#[derive(Debug, Serialize)]
pub struct RandomResponse {
    pub random: u32,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub rust_version: &'static str,
    pub git_commit: &'static str,
    pub build_timestamp: &'static str,
    pub uptime: String,
    pub uptime_seconds: u64,
}

pub async fn hello() -> &'static str {
    HELLO_MESSAGE
}

pub async fn random_number() -> Json<RandomResponse> {
    let random = rand::thread_rng().gen_range(0..100);
    Json(RandomResponse { random })
}

pub async fn version(State(state): State<Arc<AppState>>) -> Json<VersionResponse> {
    let uptime = state.uptime();
    Json(VersionResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        rust_version: env!("RUSTC_VERSION"),
        git_commit: env!("GIT_COMMIT"),
        build_timestamp: env!("BUILD_TIMESTAMP"),
        uptime: format_uptime(uptime),
        uptime_seconds: uptime.as_secs(),
    })
}

/// Returns the posted JSON object unchanged. Content-Type is not checked.
/// A literal `null` body is echoed back as `null`.
pub async fn echo(body: Bytes) -> AppResult<Json<Option<Map<String, Value>>>> {
    let payload: Option<Map<String, Value>> = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Rejected echo payload");
        AppError::BadRequest("Invalid JSON payload".to_string())
    })?;
    Ok(Json(payload))
}
