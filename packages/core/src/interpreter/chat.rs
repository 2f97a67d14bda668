use serde::{Deserialize, Serialize};

use super::Interpretation;
use crate::types::FlashcardItem;

/// Opening line of the flashcard assistant
pub const GREETING: &str =
    "Hello! I can help you create flashcards. What topic or specific flashcard would you like to create?";

/// Shown instead of an empty reply
pub const FALLBACK_MESSAGE: &str =
    "I couldn't generate a flashcard for that. Please try another topic.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Ai,
}

/// One chat bubble. A reply carrying a flashcard is an add-to-deck proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub sender: ChatSender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flashcard: Option<FlashcardItem>,
}

impl ChatReply {
    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            sender: ChatSender::Ai,
            text: text.into(),
            flashcard: None,
        }
    }

    pub fn greeting() -> Self {
        Self::ai(GREETING)
    }

    pub fn proposal(card: FlashcardItem) -> Self {
        Self {
            sender: ChatSender::Ai,
            text: format!("Here's a flashcard for \"{}\":", card.term),
            flashcard: Some(card),
        }
    }

    /// Bubble for a failed generation request
    pub fn error(detail: &str) -> Self {
        let detail = detail.trim();
        if detail.is_empty() {
            Self::ai("Error: Something went wrong while trying to connect.")
        } else {
            Self::ai(format!("Error: {detail}"))
        }
    }
}

impl Interpretation {
    pub fn into_chat_replies(self) -> Vec<ChatReply> {
        match self {
            Interpretation::Cards(cards) => cards.into_iter().map(ChatReply::proposal).collect(),
            Interpretation::PlainMessage(message) if message.trim().is_empty() => {
                vec![ChatReply::ai(FALLBACK_MESSAGE)]
            }
            Interpretation::PlainMessage(message) => vec![ChatReply::ai(message)],
        }
    }
}
