use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::config::Config;
use crate::services::deck_catalog::DeckSource;
use crate::services::generator::FlashcardGenerator;
use crate::services::study_sessions::StudySessionStore;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    config: Arc<Config>,
    decks: Arc<dyn DeckSource>,
    sessions: Arc<StudySessionStore>,
    generator: FlashcardGenerator,
}

impl AppState {
    pub fn new(config: Config, decks: Arc<dyn DeckSource>, generator: FlashcardGenerator) -> Self {
        let sessions = Arc::new(StudySessionStore::new(
            config.session_idle_timeout,
            config.max_study_sessions,
        ));
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            config: Arc::new(config),
            decks,
            sessions,
            generator,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn decks(&self) -> Arc<dyn DeckSource> {
        Arc::clone(&self.decks)
    }

    pub fn sessions(&self) -> Arc<StudySessionStore> {
        Arc::clone(&self.sessions)
    }

    pub fn generator(&self) -> &FlashcardGenerator {
        &self.generator
    }
}
