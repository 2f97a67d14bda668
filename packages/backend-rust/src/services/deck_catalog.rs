//! Read-only deck source.
//!
//! Listing is ordered by title. Search is a case-insensitive substring match
//! on the title; a blank term matches nothing. A blank category filter lists
//! everything.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

use flashdeck_core::sanitize::{clean_field, contains_ignore_case, normalize_query};
use flashdeck_core::{Deck, DeckSummary};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read deck file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid deck data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate deck id: {0}")]
    DuplicateId(String),
}

pub trait DeckSource: Send + Sync {
    fn get(&self, id: &str) -> Option<Deck>;
    fn list(&self, max: usize) -> Vec<DeckSummary>;
    fn search(&self, term: &str, max: usize) -> Vec<DeckSummary>;
    fn by_category(&self, category: &str, max: usize) -> Vec<DeckSummary>;
    fn categories(&self) -> Vec<String>;
    fn count(&self) -> usize;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDeckCatalog {
    decks: Vec<Deck>,
}

impl InMemoryDeckCatalog {
    pub fn new(mut decks: Vec<Deck>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for deck in &decks {
            if !seen.insert(deck.id.as_str()) {
                return Err(CatalogError::DuplicateId(deck.id.clone()));
            }
        }
        decks.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(Self { decks })
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let decks: Vec<Deck> = serde_json::from_str(raw)?;
        Self::new(decks)
    }

    pub async fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&raw)
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    fn summaries(&self, filter: impl Fn(&Deck) -> bool, max: usize) -> Vec<DeckSummary> {
        self.decks
            .iter()
            .filter(|deck| filter(deck))
            .take(max)
            .map(Deck::summary)
            .collect()
    }
}

impl DeckSource for InMemoryDeckCatalog {
    fn get(&self, id: &str) -> Option<Deck> {
        self.decks.iter().find(|deck| deck.id == id).cloned()
    }

    fn list(&self, max: usize) -> Vec<DeckSummary> {
        self.summaries(|_| true, max)
    }

    fn search(&self, term: &str, max: usize) -> Vec<DeckSummary> {
        let Some(needle) = normalize_query(term) else {
            return Vec::new();
        };
        self.summaries(move |deck| contains_ignore_case(&deck.title, &needle), max)
    }

    fn by_category(&self, category: &str, max: usize) -> Vec<DeckSummary> {
        let Some(category) = clean_field(category) else {
            return self.list(max);
        };
        self.summaries(move |deck| deck.category == category, max)
    }

    fn categories(&self) -> Vec<String> {
        self.decks
            .iter()
            .filter(|deck| !deck.category.is_empty())
            .map(|deck| deck.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn count(&self) -> usize {
        self.decks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_core::FlashcardItem;

    fn catalog() -> InMemoryDeckCatalog {
        let card = || vec![FlashcardItem::new("t", "d")];
        InMemoryDeckCatalog::new(vec![
            Deck::new("2", "Introduction to Physics", "Science", card()),
            Deck::new("5", "Chemistry Basics", "Science", card()),
            Deck::new("3", "Drawing Fundamentals", "Art", card()),
            Deck::new("9", "Physics Problems", "Science", card()),
            Deck::new("x", "Empty", "", Vec::new()),
        ])
        .unwrap()
    }

    #[test]
    fn test_list_is_sorted_by_title_and_capped() {
        let titles: Vec<_> = catalog().list(3).into_iter().map(|d| d.title).collect();
        assert_eq!(
            titles,
            vec!["Chemistry Basics", "Drawing Fundamentals", "Empty"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let ids: Vec<_> = catalog().search("  PHYSICS ", 50).into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["2", "9"]);
        assert_eq!(catalog().search("physics", 1).len(), 1);
    }

    #[test]
    fn test_blank_search_matches_nothing() {
        assert!(catalog().search("   ", 50).is_empty());
    }

    #[test]
    fn test_by_category_is_exact() {
        let ids: Vec<_> = catalog().by_category("Science", 50).into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["5", "2", "9"]);
        assert!(catalog().by_category("science", 50).is_empty());
        assert_eq!(catalog().by_category(" ", 50).len(), 5);
    }

    #[test]
    fn test_get_and_categories() {
        let catalog = catalog();
        assert_eq!(catalog.get("3").map(|d| d.title), Some("Drawing Fundamentals".to_string()));
        assert!(catalog.get("missing").is_none());
        assert_eq!(catalog.categories(), vec!["Art", "Science"]);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = InMemoryDeckCatalog::new(vec![
            Deck::new("1", "A", "", Vec::new()),
            Deck::new("1", "B", "", Vec::new()),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "1"));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            InMemoryDeckCatalog::from_json("not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decks.json");
        std::fs::write(
            &path,
            r#"[{"id":"a","title":"Alpha","category":"Test","flashcards":[{"word":"w","definition":"d"}]}]"#,
        )
        .unwrap();

        let catalog = InMemoryDeckCatalog::from_path(&path).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").unwrap().items.len(), 1);

        let missing = InMemoryDeckCatalog::from_path(&dir.path().join("nope.json")).await;
        assert!(matches!(missing, Err(CatalogError::Io { .. })));
    }
}
