//! # flashdeck-core - flashcard study logic
//!
//! Pure, synchronous building blocks shared by the flashdeck backend:
//!
//! - **Study session** - traversal, flip state and known/unknown marking over one deck
//! - **Interpreter** - turns raw text-generation output into flashcards or a chat message
//!
//! ## Module structure
//!
//! - [`types`] - flashcard items, decks and deck summaries
//! - [`session`] - the study session state machine and key bindings
//! - [`interpreter`] - AI response interpretation and chat rendering
//! - [`sanitize`] - text field cleanup and query normalization
//!
//! ## Example
//!
//! ```rust
//! use flashdeck_core::{interpret, Deck, FlashcardItem, Interpretation, StudySession};
//!
//! let deck = Deck::new(
//!     "spanish-1",
//!     "Spanish Vocabulary",
//!     "Languages",
//!     vec![FlashcardItem::new("gato", "cat"), FlashcardItem::new("perro", "dog")],
//! );
//! let mut session = StudySession::new(deck).unwrap();
//! session.flip();
//! session.mark_known();
//! assert_eq!(session.current_index(), 1);
//! assert_eq!(session.known_count(), 1);
//!
//! let reply = interpret(r#"{"word":"dog","definition":"a domesticated canine"}"#);
//! assert!(matches!(reply, Interpretation::Cards(ref cards) if cards.len() == 1));
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod interpreter;
pub mod sanitize;
pub mod session;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

/// Shared data types
pub use types::*;

/// Study session state machine
pub use session::{SessionSnapshot, StudyCommand, StudyError, StudySession};

/// AI response interpretation
pub use interpreter::{interpret, ChatReply, Interpretation};
