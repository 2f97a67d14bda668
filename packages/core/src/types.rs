//! Common Types and Constants
//!
//! Data structures shared by the session and interpreter modules and by the
//! backend's deck catalog.

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Default cap on listing and search results
pub const DEFAULT_MAX_RESULTS: usize = 50;

// ==================== Flashcards ====================

/// A single term/definition pair.
///
/// On the wire the term is called `word`, matching what the front end and the
/// generation prompt use; `term` is accepted when reading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardItem {
    #[serde(rename = "word", alias = "term")]
    pub term: String,
    pub definition: String,
}

impl FlashcardItem {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

// ==================== Decks ====================

/// A named, ordered collection of flashcards under a category
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "flashcards", alias = "items", default)]
    pub items: Vec<FlashcardItem>,
}

impl Deck {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        items: Vec<FlashcardItem>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self) -> DeckSummary {
        DeckSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
        }
    }
}

/// Listing/search view of a deck, without its cards
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSummary {
    pub id: String,
    pub title: String,
    pub category: String,
}
