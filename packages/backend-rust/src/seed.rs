use std::path::Path;

use flashdeck_core::Deck;

use crate::services::deck_catalog::{CatalogError, InMemoryDeckCatalog};

const SAMPLE_DECKS: &str = include_str!("../data/sample_decks.json");

pub fn sample_decks() -> Result<Vec<Deck>, CatalogError> {
    Ok(serde_json::from_str(SAMPLE_DECKS)?)
}

/// Built-in catalog used when no deck file is configured
pub fn sample_catalog() -> Result<InMemoryDeckCatalog, CatalogError> {
    InMemoryDeckCatalog::new(sample_decks()?)
}

pub async fn load_catalog(path: Option<&Path>) -> Result<InMemoryDeckCatalog, CatalogError> {
    let catalog = match path {
        Some(path) => {
            let catalog = InMemoryDeckCatalog::from_path(path).await?;
            tracing::info!(path = %path.display(), decks = catalog.len(), "loaded deck catalog");
            catalog
        }
        None => {
            let catalog = sample_catalog()?;
            tracing::info!(decks = catalog.len(), "using built-in sample decks");
            catalog
        }
    };
    Ok(catalog)
}
