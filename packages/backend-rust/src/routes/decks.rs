use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_decks))
        .route("/categories", get(categories))
        .route("/:id", get(get_deck))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeckQuery {
    q: Option<String>,
    category: Option<String>,
    limit: Option<usize>,
}

async fn list_decks(
    State(state): State<AppState>,
    query: Result<Query<DeckQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return AppError::bad_request(rejection.body_text()).into_response(),
    };
    let default_max = state.config().search_max_results;
    let max = query
        .limit
        .filter(|v| *v > 0)
        .unwrap_or(default_max)
        .min(default_max.saturating_mul(4));
    let decks = state.decks();
    let term = query.q.as_deref().filter(|t| !t.trim().is_empty());
    let category = query.category.as_deref().map(str::trim).filter(|c| !c.is_empty());

    let results = match (term, category) {
        (Some(term), Some(category)) => {
            let mut found = decks.search(term, usize::MAX);
            found.retain(|deck| deck.category == category);
            found.truncate(max);
            found
        }
        (Some(term), None) => decks.search(term, max),
        (None, Some(category)) => decks.by_category(category, max),
        (None, None) => decks.list(max),
    };

    ok(results).into_response()
}

async fn categories(State(state): State<AppState>) -> Response {
    ok(state.decks().categories()).into_response()
}

async fn get_deck(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.decks().get(&id) {
        Some(deck) => ok(deck).into_response(),
        None => AppError::not_found("Flashcard set not found").into_response(),
    }
}
