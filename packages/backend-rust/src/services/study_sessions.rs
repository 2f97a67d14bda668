use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use thiserror::Error;
use uuid::Uuid;

use flashdeck_core::{Deck, SessionSnapshot, StudyCommand, StudyError, StudySession};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpenSessionError {
    #[error(transparent)]
    Study(#[from] StudyError),
    #[error("too many active study sessions (limit {0})")]
    AtCapacity(usize),
}

struct SessionEntry {
    session: StudySession,
    last_active: Instant,
}

/// Server-held study sessions.
///
/// A command and the snapshot it returns are taken under one write lock, so a
/// caller never sees `current_index` and `is_flipped` from different states.
pub struct StudySessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl StudySessionStore {
    pub fn new(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
            max_sessions,
        }
    }

    /// Opens a session; idle sessions are pruned first, then the live count is checked
    pub fn open(&self, deck: Deck) -> Result<(Uuid, SessionSnapshot), OpenSessionError> {
        let session = StudySession::new(deck)?;
        let now = Instant::now();
        let pruned = self.prune_idle(now);
        if pruned > 0 {
            tracing::debug!(pruned, "discarded idle study sessions");
        }

        let id = Uuid::new_v4();
        let snapshot = session.snapshot();
        {
            let mut guard = self.sessions.write();
            if guard.len() >= self.max_sessions {
                tracing::warn!(limit = self.max_sessions, "study session limit reached");
                return Err(OpenSessionError::AtCapacity(self.max_sessions));
            }
            guard.insert(
                id,
                SessionEntry {
                    session,
                    last_active: now,
                },
            );
        }
        tracing::info!(session_id = %id, deck_id = %snapshot.deck_id, total = snapshot.total, "study session opened");
        Ok((id, snapshot))
    }

    pub fn snapshot(&self, id: &Uuid) -> Option<SessionSnapshot> {
        let mut guard = self.sessions.write();
        let entry = guard.get_mut(id)?;
        entry.last_active = Instant::now();
        Some(entry.session.snapshot())
    }

    pub fn apply(&self, id: &Uuid, command: StudyCommand) -> Option<SessionSnapshot> {
        let mut guard = self.sessions.write();
        let entry = guard.get_mut(id)?;
        entry.session.apply(command);
        entry.last_active = Instant::now();
        Some(entry.session.snapshot())
    }

    pub fn close(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "study session closed");
        }
        removed
    }

    /// Drop sessions idle for longer than the configured timeout as of `now`
    pub fn prune_idle(&self, now: Instant) -> usize {
        let mut guard = self.sessions.write();
        let before = guard.len();
        guard.retain(|_, entry| now.saturating_duration_since(entry.last_active) <= self.idle_timeout);
        before - guard.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;
    use flashdeck_core::FlashcardItem;

    fn deck_of(n: usize) -> Deck {
        let items = (0..n)
            .map(|i| FlashcardItem::new(format!("t{i}"), format!("d{i}")))
            .collect();
        Deck::new("d", "Deck", "Test", items)
    }

    fn store() -> StudySessionStore {
        StudySessionStore::new(Duration::from_secs(60), 100)
    }

    #[test]
    fn test_open_rejects_empty_deck() {
        let store = store();
        assert_eq!(
            store.open(deck_of(0)).unwrap_err(),
            OpenSessionError::Study(StudyError::EmptyDeck)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_apply_returns_updated_snapshot() {
        let store = store();
        let (id, snapshot) = store.open(deck_of(3)).unwrap();
        assert_eq!(snapshot.current_index, 0);

        let after = store.apply(&id, StudyCommand::MarkKnown).unwrap();
        assert_eq!(after.current_index, 1);
        assert_eq!(after.known_indices, vec![0]);
        assert_eq!(store.snapshot(&id), Some(after));
    }

    #[test]
    fn test_unknown_session_is_none() {
        let store = store();
        let id = Uuid::new_v4();
        assert!(store.snapshot(&id).is_none());
        assert!(store.apply(&id, StudyCommand::Next).is_none());
        assert!(!store.close(&id));
    }

    #[test]
    fn test_close_discards_session() {
        let store = store();
        let (id, _) = store.open(deck_of(2)).unwrap();
        assert!(store.close(&id));
        assert!(store.snapshot(&id).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_prune_idle_drops_stale_sessions() {
        let store = store();
        store.open(deck_of(2)).unwrap();
        store.open(deck_of(2)).unwrap();
        assert_eq!(store.prune_idle(Instant::now()), 0);
        assert_eq!(store.prune_idle(Instant::now() + Duration::from_secs(120)), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_respects_session_limit() {
        let store = StudySessionStore::new(Duration::from_secs(60), 2);
        let (first, _) = store.open(deck_of(2)).unwrap();
        store.open(deck_of(2)).unwrap();

        assert_eq!(store.open(deck_of(2)).unwrap_err(), OpenSessionError::AtCapacity(2));
        assert_eq!(store.len(), 2);

        assert!(store.close(&first));
        assert!(store.open(deck_of(2)).is_ok());
    }

    #[test]
    fn test_idle_sessions_free_capacity() {
        let store = StudySessionStore::new(Duration::ZERO, 1);
        store.open(deck_of(2)).unwrap();
        std::thread::sleep(Duration::from_millis(5));

        assert!(store.open(deck_of(2)).is_ok());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_commands_stay_in_bounds() {
        let store = Arc::new(store());
        let (id, _) = store.open(deck_of(10)).unwrap();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    for _ in 0..5 {
                        let snapshot = store.apply(&id, StudyCommand::Next).unwrap();
                        assert!(snapshot.current_index < 10);
                        assert!(!snapshot.is_flipped);
                    }
                });
            }
        });

        assert_eq!(store.snapshot(&id).unwrap().current_index, 9);
    }

    proptest! {
        #[test]
        fn prop_store_matches_local_session(
            len in 1usize..12,
            commands in prop::collection::vec(prop::sample::select(StudyCommand::ALL.to_vec()), 0..50),
        ) {
            let store = store();
            let (id, _) = store.open(deck_of(len)).unwrap();
            let mut local = StudySession::new(deck_of(len)).unwrap();

            for command in commands {
                local.apply(command);
                let snapshot = store.apply(&id, command).unwrap();
                prop_assert_eq!(snapshot, local.snapshot());
            }
        }
    }
}
