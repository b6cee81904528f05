//! JSON file card store.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use stepcards_core::{Card, CardStore, Cards, StoreError};
use uuid::Uuid;

/// Card store persisted as a single JSON array.
///
/// Every write rewrites the file through a temporary sibling and a rename,
/// and only updates the in-memory copy once the file is on disk.
pub struct FileStore {
    path: PathBuf,
    cards: RwLock<Cards>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// Records that fail the card invariants are rejected instead of being
    /// repaired.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let cards = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let cards: Vec<Card> = serde_json::from_str(&raw)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            for card in &cards {
                card.check_invariants()?;
            }
            tracing::info!("Loaded {} cards from {}", cards.len(), path.display());
            Cards::from_vec(cards)
        } else {
            tracing::info!("Card file {} not found, starting empty", path.display());
            Cards::default()
        };

        Ok(Self {
            path,
            cards: RwLock::new(cards),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, cards: &Cards) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&cards.to_vec())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        write_atomic(&self.path, &json)
    }
}

/// Write `contents` to a temporary file next to `path`, then rename it over `path`.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl CardStore for FileStore {
    fn load(&self, id: Uuid) -> Result<Option<Card>, StoreError> {
        let cards = self.cards.read().map_err(|_| StoreError::Poisoned)?;
        Ok(cards.get(id).cloned())
    }

    fn save(&self, card: &Card) -> Result<(), StoreError> {
        let mut cards = self.cards.write().map_err(|_| StoreError::Poisoned)?;
        let mut next = cards.clone();
        next.insert(card.clone());
        self.persist(&next)?;
        *cards = next;
        Ok(())
    }

    fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut cards = self.cards.write().map_err(|_| StoreError::Poisoned)?;
        let mut next = cards.clone();
        if !next.remove(id) {
            return Ok(false);
        }
        self.persist(&next)?;
        *cards = next;
        Ok(true)
    }

    fn list(&self) -> Result<Vec<Card>, StoreError> {
        let cards = self.cards.read().map_err(|_| StoreError::Poisoned)?;
        Ok(cards.to_vec())
    }
}
