//! AI flashcard generation: prompt, single-flight guard, interpretation.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use flashdeck_core::sanitize::{clean_field, normalize_query};
use flashdeck_core::{interpret, Interpretation};

use crate::services::llm_provider::{LlmError, LlmProvider};

const PROMPT_TEMPLATE: &str = r#"
Generate flashcards based on the following topic or term. Provide a related term and its definition in a JSON format.
Your output must be either an array of objects: [{ "word": "term", "definition": "definition" }, ...]
OR a single object: { "word": "term", "definition": "definition" }.
If you cannot generate a flashcard, respond with a polite, non-JSON message.
Topic:
"#;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Topic is required")]
    EmptyTopic,
    #[error("a request for this topic is already in progress")]
    InFlight,
    #[error("text generation is not available")]
    Unavailable,
    #[error(transparent)]
    Provider(#[from] LlmError),
}

pub fn build_prompt(topic: &str) -> String {
    format!("{PROMPT_TEMPLATE}{topic}")
}

/// Runs one generation per topic at a time and interprets the raw reply.
#[derive(Clone)]
pub struct FlashcardGenerator {
    provider: Arc<LlmProvider>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl FlashcardGenerator {
    pub fn new(provider: LlmProvider) -> Self {
        Self {
            provider: Arc::new(provider),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().len()
    }

    pub async fn generate(&self, topic: &str) -> Result<Interpretation, GenerateError> {
        let topic = clean_field(topic).ok_or(GenerateError::EmptyTopic)?;
        if !self.provider.is_available() {
            return Err(GenerateError::Unavailable);
        }

        let _slot = self.claim(&topic)?;
        tracing::debug!(topic = %topic, "generating flashcards");

        let raw = self.provider.generate(&build_prompt(&topic)).await?;
        let interpretation = interpret(&raw);
        match &interpretation {
            Interpretation::Cards(cards) => {
                tracing::info!(topic = %topic, count = cards.len(), "generated flashcards")
            }
            Interpretation::PlainMessage(_) => {
                tracing::info!(topic = %topic, "generator answered with a plain message")
            }
        }
        Ok(interpretation)
    }

    fn claim(&self, topic: &str) -> Result<InFlightSlot, GenerateError> {
        let key = normalize_query(topic).ok_or(GenerateError::EmptyTopic)?;
        let mut guard = self.in_flight.lock();
        if !guard.insert(key.clone()) {
            tracing::warn!(topic = %topic, "duplicate generation request rejected");
            return Err(GenerateError::InFlight);
        }
        Ok(InFlightSlot {
            key,
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}

/// Releases the topic when the request finishes, fails or is cancelled
struct InFlightSlot {
    key: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.key);
    }
}
