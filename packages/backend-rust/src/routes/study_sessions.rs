use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashdeck_core::{SessionSnapshot, StudyCommand};

use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(open_session))
        .route("/:id", get(get_session).delete(close_session))
        .route("/:id/commands/:command", post(run_command))
        .route("/:id/keys", post(press_key))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenSessionRequest {
    deck_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OpenSessionResponse {
    session_id: Uuid,
    session: SessionSnapshot,
}

#[derive(Debug, Deserialize)]
struct KeyPressRequest {
    key: String,
}

fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found("Study session not found"))
}

fn session_not_found() -> AppError {
    AppError::not_found("Study session not found")
}

async fn open_session(
    State(state): State<AppState>,
    payload: Result<Json<OpenSessionRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let deck_id = body.deck_id.trim();
    if deck_id.is_empty() {
        return Err(AppError::validation("deckId is required"));
    }

    let deck = state
        .decks()
        .get(deck_id)
        .ok_or_else(|| AppError::not_found("Flashcard set not found"))?;

    let (session_id, session) = state.sessions().open(deck)?;

    Ok((
        StatusCode::CREATED,
        ok(OpenSessionResponse {
            session_id,
            session,
        }),
    )
        .into_response())
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_session_id(&id)?;
    let snapshot = state.sessions().snapshot(&id).ok_or_else(session_not_found)?;
    Ok(ok(snapshot).into_response())
}

async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_session_id(&id)?;
    if !state.sessions().close(&id) {
        return Err(session_not_found());
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn run_command(
    State(state): State<AppState>,
    Path((id, command)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let id = parse_session_id(&id)?;
    let command: StudyCommand = command.parse().map_err(AppError::validation)?;
    let snapshot = state.sessions().apply(&id, command).ok_or_else(session_not_found)?;
    Ok(ok(snapshot).into_response())
}

async fn press_key(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<KeyPressRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let id = parse_session_id(&id)?;
    let Json(body) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let command = StudyCommand::from_key(&body.key)
        .ok_or_else(|| AppError::validation(format!("key is not bound to a study command: {}", body.key)))?;
    let snapshot = state.sessions().apply(&id, command).ok_or_else(session_not_found)?;
    Ok(ok(snapshot).into_response())
}
