//! Collaborator contracts for card storage and parameter settings.
//!
//! The scheduler never touches these itself. Callers load a card through a
//! [`CardStore`], read the current [`Parameters`] from a [`ParameterSource`],
//! run [`crate::review`], and save the result before accepting the next
//! review of that card.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::StoreError;
use crate::params::Parameters;
use crate::types::Card;

/// Durable mapping from card id to the full card record.
pub trait CardStore: Send + Sync {
    fn load(&self, id: Uuid) -> Result<Option<Card>, StoreError>;

    /// Insert or replace the card with the same id.
    fn save(&self, card: &Card) -> Result<(), StoreError>;

    /// Returns whether a card was removed.
    fn remove(&self, id: Uuid) -> Result<bool, StoreError>;

    /// All cards, in insertion order.
    fn list(&self) -> Result<Vec<Card>, StoreError>;
}

/// Source of the parameters in effect right now.
///
/// Read on every review, so edits apply from the next review onwards.
pub trait ParameterSource: Send + Sync {
    fn current(&self) -> Parameters;
}

impl ParameterSource for Parameters {
    fn current(&self) -> Parameters {
        self.clone()
    }
}

/// Card store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Cards>,
}

/// Cards keyed by id, remembering insertion order.
#[derive(Debug, Default, Clone)]
pub struct Cards {
    order: Vec<Uuid>,
    by_id: HashMap<Uuid, Card>,
}

impl Cards {
    pub fn from_vec(cards: Vec<Card>) -> Self {
        let mut out = Self::default();
        for card in cards {
            out.insert(card);
        }
        out
    }

    pub fn get(&self, id: Uuid) -> Option<&Card> {
        self.by_id.get(&id)
    }

    pub fn insert(&mut self, card: Card) {
        if !self.by_id.contains_key(&card.id) {
            self.order.push(card.id);
        }
        self.by_id.insert(card.id, card);
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        if self.by_id.remove(&id).is_some() {
            self.order.retain(|other| *other != id);
            true
        } else {
            false
        }
    }

    pub fn to_vec(&self) -> Vec<Card> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, rejecting records that fail [`Card::check_invariants`].
    pub fn with_cards(cards: Vec<Card>) -> Result<Self, StoreError> {
        for card in &cards {
            card.check_invariants()?;
        }
        Ok(Self {
            inner: RwLock::new(Cards::from_vec(cards)),
        })
    }
}

impl CardStore for MemoryStore {
    fn load(&self, id: Uuid) -> Result<Option<Card>, StoreError> {
        let cards = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(cards.get(id).cloned())
    }

    fn save(&self, card: &Card) -> Result<(), StoreError> {
        let mut cards = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        cards.insert(card.clone());
        Ok(())
    }

    fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut cards = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(cards.remove(id))
    }

    fn list(&self) -> Result<Vec<Card>, StoreError> {
        let cards = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(cards.to_vec())
    }
}
