pub mod config;
pub mod logging;
pub mod response;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::services::deck_catalog::CatalogError;
use crate::services::generator::FlashcardGenerator;
use crate::services::llm_provider::LlmProvider;
use crate::state::AppState;

pub fn build_app(state: AppState) -> axum::Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn create_state(config: Config) -> Result<AppState, CatalogError> {
    let catalog = seed::load_catalog(config.decks_path.as_deref()).await?;
    let generator = FlashcardGenerator::new(LlmProvider::from_env());
    if !generator.provider().is_available() {
        tracing::warn!("LLM_API_KEY not set, flashcard generation is disabled");
    }
    Ok(AppState::new(config, Arc::new(catalog), generator))
}

pub async fn create_app() -> Result<axum::Router, CatalogError> {
    let state = create_state(Config::from_env()).await?;
    Ok(build_app(state))
}
