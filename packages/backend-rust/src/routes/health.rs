use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::config::env_string;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/info", get(info))
        .route("/live", get(live))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    text_generation: &'static str,
    decks: usize,
    active_sessions: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthInfoResponse {
    service: &'static str,
    version: String,
    environment: String,
    start_time: String,
    uptime: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LivenessResponse {
    status: &'static str,
    timestamp: String,
    uptime: u64,
}

async fn root(State(state): State<AppState>) -> Response {
    let generator = state.generator().provider();
    let text_generation = if generator.is_mock() {
        "mock"
    } else if generator.is_available() {
        "configured"
    } else {
        "unconfigured"
    };

    let response = HealthResponse {
        status: "ok",
        timestamp: now_iso(),
        text_generation,
        decks: state.decks().count(),
        active_sessions: state.sessions().len(),
    };

    Json(response).into_response()
}

async fn info(State(state): State<AppState>) -> Response {
    let response = HealthInfoResponse {
        service: "flashdeck-backend",
        version: env_string("APP_VERSION").unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
        environment: env_string("APP_ENV").unwrap_or_else(|| "development".to_string()),
        start_time: system_time_iso(state.started_at_system()),
        uptime: state.uptime_seconds(),
    };

    Json(response).into_response()
}

async fn live(State(state): State<AppState>) -> Response {
    let response = LivenessResponse {
        status: "healthy",
        timestamp: now_iso(),
        uptime: state.uptime_seconds(),
    };

    Json(response).into_response()
}

fn system_time_iso(time: std::time::SystemTime) -> String {
    let datetime: chrono::DateTime<chrono::Utc> = time.into();
    datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
