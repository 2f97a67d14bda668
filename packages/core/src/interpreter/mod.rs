//! AI Flashcard Interpreter
//!
//! Text-generation output is untrusted: it may be a JSON array of cards, a
//! single card object, or a free-form refusal. [`interpret`] maps every input
//! to exactly one [`Interpretation`] and never fails.
//!
//! Rules, in order:
//! 1. Text that is not JSON is a plain message, returned unchanged.
//! 2. A JSON array keeps the entries that are objects with non-blank string
//!    `word` (or `term`) and `definition` fields, in input order. No usable
//!    entry yields [`NO_FLASHCARDS_MESSAGE`].
//! 3. A JSON object with both fields is a single card.
//! 4. Anything else (numbers, strings, null, incomplete objects) is a plain
//!    message carrying the raw text.

mod chat;

pub use chat::{ChatReply, ChatSender, FALLBACK_MESSAGE, GREETING};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::sanitize::clean_field;
use crate::types::FlashcardItem;

/// Returned when the generator answered with structured data that held no usable card
pub const NO_FLASHCARDS_MESSAGE: &str =
    "The model returned a structured response, but no flashcards were found.";

const TERM_FIELDS: [&str; 2] = ["word", "term"];
const DEFINITION_FIELD: &str = "definition";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum Interpretation {
    /// One or more cards, never empty
    Cards(Vec<FlashcardItem>),
    /// Conversational reply to show as-is
    PlainMessage(String),
}

impl Interpretation {
    pub fn cards(&self) -> Option<&[FlashcardItem]> {
        match self {
            Self::Cards(cards) => Some(cards),
            Self::PlainMessage(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Cards(_) => None,
            Self::PlainMessage(message) => Some(message),
        }
    }
}

pub fn interpret(raw: &str) -> Interpretation {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return Interpretation::PlainMessage(raw.to_string()),
    };

    match &parsed {
        Value::Array(entries) => {
            let cards: Vec<FlashcardItem> = entries
                .iter()
                .filter_map(Value::as_object)
                .filter_map(card_from_fields)
                .collect();
            if cards.is_empty() {
                Interpretation::PlainMessage(NO_FLASHCARDS_MESSAGE.to_string())
            } else {
                Interpretation::Cards(cards)
            }
        }
        Value::Object(fields) => match card_from_fields(fields) {
            Some(card) => Interpretation::Cards(vec![card]),
            None => Interpretation::PlainMessage(raw.to_string()),
        },
        _ => Interpretation::PlainMessage(raw.to_string()),
    }
}

fn card_from_fields(fields: &Map<String, Value>) -> Option<FlashcardItem> {
    let term = TERM_FIELDS
        .iter()
        .find_map(|name| text_field(fields, name))?;
    let definition = text_field(fields, DEFINITION_FIELD)?;
    Some(FlashcardItem { term, definition })
}

fn text_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(Value::as_str).and_then(clean_field)
}
