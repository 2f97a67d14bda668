#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use flashdeck_backend::config::Config;
use flashdeck_backend::seed::sample_decks;
use flashdeck_backend::services::deck_catalog::InMemoryDeckCatalog;
use flashdeck_backend::services::generator::FlashcardGenerator;
use flashdeck_backend::services::llm_provider::LlmProvider;
use flashdeck_backend::state::AppState;
use flashdeck_core::{Deck, FlashcardItem};

pub const EMPTY_DECK_ID: &str = "empty-deck";

/// Sample catalog plus one deck without cards
pub fn test_decks() -> Vec<Deck> {
    let mut decks = sample_decks().unwrap();
    decks.push(Deck::new(EMPTY_DECK_ID, "Nothing Yet", "Drafts", Vec::new()));
    decks
}

pub fn app_with(provider: LlmProvider) -> Router {
    app_with_config(Config::default(), provider)
}

pub fn app_with_config(config: Config, provider: LlmProvider) -> Router {
    let catalog = InMemoryDeckCatalog::new(test_decks()).unwrap();
    let state = AppState::new(config, Arc::new(catalog), FlashcardGenerator::new(provider));
    flashdeck_backend::build_app(state)
}

pub fn mock_provider() -> LlmProvider {
    LlmProvider::mock(r#"[{"word":"cat","definition":"a small domesticated feline"}]"#)
}

pub fn create_test_app() -> Router {
    app_with(mock_provider())
}

pub fn sample_deck(len: usize) -> Deck {
    let items = (0..len)
        .map(|i| FlashcardItem::new(format!("t{i}"), format!("d{i}")))
        .collect();
    Deck::new("sample", "Sample", "Testing", items)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Serve `router` on an ephemeral local port and return its address
pub async fn spawn_stub(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}
