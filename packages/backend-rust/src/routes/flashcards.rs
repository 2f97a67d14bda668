use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use flashdeck_core::{ChatReply, FlashcardItem, Interpretation};

use crate::response::{ok, AppError};
use crate::services::generator::GenerateError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(generate))
        .route("/chat", get(open_chat).post(chat))
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    topic: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GenerateResponse {
    Flashcards { flashcards: Vec<FlashcardItem> },
    Message { message: String },
}

impl From<Interpretation> for GenerateResponse {
    fn from(interpretation: Interpretation) -> Self {
        match interpretation {
            Interpretation::Cards(flashcards) => Self::Flashcards { flashcards },
            Interpretation::PlainMessage(message) => Self::Message { message },
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationFailure {
    success: bool,
    error: &'static str,
    code: &'static str,
    details: String,
}

fn topic_of(payload: Result<Json<GenerateRequest>, JsonRejection>) -> Result<String, AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    Ok(body.topic.unwrap_or_default())
}

fn generation_error(err: GenerateError) -> Response {
    match err {
        GenerateError::EmptyTopic => AppError::validation(err.to_string()).into_response(),
        GenerateError::InFlight => AppError::conflict(err.to_string()).into_response(),
        GenerateError::Unavailable => AppError::unavailable(err.to_string()).into_response(),
        GenerateError::Provider(source) => {
            tracing::error!(error = %source, "flashcard generation failed");
            let body = GenerationFailure {
                success: false,
                error: "Internal server error",
                code: "GENERATION_FAILED",
                details: source.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let topic = match topic_of(payload) {
        Ok(topic) => topic,
        Err(err) => return err.into_response(),
    };

    match state.generator().generate(&topic).await {
        Ok(interpretation) => Json(GenerateResponse::from(interpretation)).into_response(),
        Err(err) => generation_error(err),
    }
}

/// The assistant's opening line
async fn open_chat() -> Response {
    ok(vec![ChatReply::greeting()]).into_response()
}

/// Chat-assistant view: generation failures become an error bubble.
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let topic = match topic_of(payload) {
        Ok(topic) => topic,
        Err(err) => return err.into_response(),
    };

    let replies = match state.generator().generate(&topic).await {
        Ok(interpretation) => interpretation.into_chat_replies(),
        Err(err @ (GenerateError::EmptyTopic | GenerateError::InFlight)) => {
            return generation_error(err);
        }
        Err(err) => {
            tracing::warn!(error = %err, "flashcard chat request failed");
            vec![ChatReply::error(&err.to_string())]
        }
    };

    ok(replies).into_response()
}
