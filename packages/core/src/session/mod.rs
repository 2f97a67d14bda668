//! Study Session
//!
//! Traversal, flip state and known/unknown marking over one deck.
//!
//! The state is the pair `(current_index, is_flipped)` plus the set of card
//! indices the learner marked as known. `current_index` is always a valid
//! index into the deck, which is why an empty deck cannot start a session.
//! Moving past either end of the deck is a no-op rather than an error.

mod command;

pub use command::StudyCommand;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Deck, FlashcardItem};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudyError {
    #[error("deck has no flashcards to study")]
    EmptyDeck,
}

/// Transient study state over one deck instance
#[derive(Clone, Debug)]
pub struct StudySession {
    deck: Deck,
    current_index: usize,
    is_flipped: bool,
    known: BTreeSet<usize>,
}

impl StudySession {
    pub fn new(deck: Deck) -> Result<Self, StudyError> {
        if deck.is_empty() {
            return Err(StudyError::EmptyDeck);
        }
        Ok(Self {
            deck,
            current_index: 0,
            is_flipped: false,
            known: BTreeSet::new(),
        })
    }

    // ==================== Operations ====================

    pub fn flip(&mut self) {
        self.is_flipped = !self.is_flipped;
    }

    /// Advance one card and show its front. No-op on the last card.
    pub fn next(&mut self) {
        if self.current_index + 1 < self.deck.len() {
            self.current_index += 1;
            self.is_flipped = false;
        }
    }

    /// Go back one card and show its front. No-op on the first card.
    pub fn previous(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
            self.is_flipped = false;
        }
    }

    pub fn mark_known(&mut self) {
        self.known.insert(self.current_index);
        self.next();
    }

    pub fn mark_unknown(&mut self) {
        self.known.remove(&self.current_index);
        self.next();
    }

    pub fn restart(&mut self) {
        self.current_index = 0;
        self.is_flipped = false;
        self.known.clear();
    }

    pub fn apply(&mut self, command: StudyCommand) {
        match command {
            StudyCommand::Flip => self.flip(),
            StudyCommand::Next => self.next(),
            StudyCommand::Previous => self.previous(),
            StudyCommand::MarkKnown => self.mark_known(),
            StudyCommand::MarkUnknown => self.mark_unknown(),
            StudyCommand::Restart => self.restart(),
        }
    }

    // ==================== Accessors ====================

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn total(&self) -> usize {
        self.deck.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn current_card(&self) -> &FlashcardItem {
        &self.deck.items[self.current_index]
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.deck.len()
    }

    pub fn is_known(&self, index: usize) -> bool {
        self.known.contains(&index)
    }

    pub fn is_current_known(&self) -> bool {
        self.is_known(self.current_index)
    }

    pub fn known_indices(&self) -> &BTreeSet<usize> {
        &self.known
    }

    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    /// Fraction of the deck reached, counting the current card: `(index + 1) / len`
    pub fn progress_fraction(&self) -> f64 {
        (self.current_index + 1) as f64 / self.deck.len() as f64
    }

    /// The learner is on the last card and has revealed its answer
    pub fn is_complete(&self) -> bool {
        self.is_last() && self.is_flipped
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            deck_id: self.deck.id.clone(),
            title: self.deck.title.clone(),
            category: self.deck.category.clone(),
            current_index: self.current_index,
            is_flipped: self.is_flipped,
            total: self.deck.len(),
            known_indices: self.known.iter().copied().collect(),
            known_count: self.known.len(),
            progress: self.progress_fraction(),
            is_complete: self.is_complete(),
            current_card: self.current_card().clone(),
        }
    }
}

/// Self-consistent view of a session taken at one point in time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub deck_id: String,
    pub title: String,
    pub category: String,
    pub current_index: usize,
    pub is_flipped: bool,
    pub total: usize,
    pub known_indices: Vec<usize>,
    pub known_count: usize,
    pub progress: f64,
    pub is_complete: bool,
    pub current_card: FlashcardItem,
}
