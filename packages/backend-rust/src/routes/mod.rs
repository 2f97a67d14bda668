mod decks;
mod flashcards;
mod health;
mod study_sessions;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;

use crate::config::env_string;
use crate::response::json_error;
use crate::state::AppState;

const FLASHCARDS_PREFIX: &str = "/api/flashcards";
const DECKS_PREFIX: &str = "/api/decks";
const STUDY_SESSIONS_PREFIX: &str = "/api/study-sessions";
const API_PREFIXES: [&str; 3] = [FLASHCARDS_PREFIX, DECKS_PREFIX, STUDY_SESSIONS_PREFIX];

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .nest(FLASHCARDS_PREFIX, flashcards::router())
        .nest(DECKS_PREFIX, decks::router())
        .nest(STUDY_SESSIONS_PREFIX, study_sessions::router());

    for path in health_paths(env_string("HEALTHCHECK_ENDPOINT").as_deref()) {
        app = app.nest(&path, health::router());
    }

    app.fallback(fallback_handler).with_state(state)
}

/// `/health`, `/api/health` and an optional custom endpoint that does not collide with the API
fn health_paths(custom: Option<&str>) -> Vec<String> {
    let mut paths = vec!["/health".to_string(), "/api/health".to_string()];
    let Some(raw) = custom else {
        return paths;
    };

    let endpoint = normalize_healthcheck_endpoint(raw);
    if endpoint == "/" || paths.contains(&endpoint) {
        return paths;
    }
    if overlaps_api(&endpoint) {
        tracing::warn!(endpoint = %endpoint, "HEALTHCHECK_ENDPOINT overlaps an API route, ignoring it");
        return paths;
    }

    paths.push(endpoint);
    paths
}

fn overlaps_api(path: &str) -> bool {
    API_PREFIXES.iter().any(|prefix| {
        path == *prefix
            || path.starts_with(&format!("{prefix}/"))
            || prefix.starts_with(&format!("{path}/"))
    })
}

fn normalize_healthcheck_endpoint(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/health".to_string();
    }

    let with_slash = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    if with_slash != "/" {
        with_slash.trim_end_matches('/').to_string()
    } else {
        "/".to_string()
    }
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_healthcheck_endpoint() {
        assert_eq!(normalize_healthcheck_endpoint(""), "/health");
        assert_eq!(normalize_healthcheck_endpoint("status/"), "/status");
        assert_eq!(normalize_healthcheck_endpoint("/"), "/");
        assert_eq!(normalize_healthcheck_endpoint(" /ping "), "/ping");
    }

    #[test]
    fn test_health_paths_skip_api_overlaps() {
        let defaults = vec!["/health".to_string(), "/api/health".to_string()];
        assert_eq!(health_paths(None), defaults);
        assert_eq!(health_paths(Some("/api/decks")), defaults);
        assert_eq!(health_paths(Some("/api/study-sessions/")), defaults);
        assert_eq!(health_paths(Some("/api/flashcards/ping")), defaults);
        assert_eq!(health_paths(Some("/api")), defaults);
        assert_eq!(health_paths(Some("/")), defaults);
        assert_eq!(health_paths(Some("health")), defaults);
        assert_eq!(health_paths(Some("/status"))[2], "/status");
        assert_eq!(health_paths(Some("/api/status"))[2], "/api/status");
    }

    #[test]
    fn test_router_builds_with_overlapping_endpoint() {
        use crate::services::deck_catalog::InMemoryDeckCatalog;
        use crate::services::generator::FlashcardGenerator;
        use crate::services::llm_provider::LlmProvider;

        std::env::set_var("HEALTHCHECK_ENDPOINT", "/api/decks");
        let state = AppState::new(
            crate::config::Config::default(),
            std::sync::Arc::new(InMemoryDeckCatalog::default()),
            FlashcardGenerator::new(LlmProvider::mock("[]")),
        );
        let _app = router(state);
        std::env::remove_var("HEALTHCHECK_ENDPOINT");
    }
}
