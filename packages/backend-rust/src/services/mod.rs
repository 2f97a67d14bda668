pub mod deck_catalog;
pub mod generator;
pub mod llm_provider;
pub mod study_sessions;
