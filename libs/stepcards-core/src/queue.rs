//! Study queue assembly and collection statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithm::is_due;
use crate::types::{Card, CardStatus};

/// Caps on how many cards one study session presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueLimits {
    pub new_cards: usize,
    pub reviews: usize,
}

impl Default for QueueLimits {
    fn default() -> Self {
        Self {
            new_cards: 20,
            reviews: 200,
        }
    }
}

/// Study queue containing cards to study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyQueue {
    pub new_cards: Vec<Card>,
    pub review_cards: Vec<Card>,
    /// Due cards left out because of the limits.
    pub new_remaining: usize,
    pub review_remaining: usize,
}

impl StudyQueue {
    /// Collect the cards due at `now`.
    ///
    /// New cards keep the order they are given in; other due cards are
    /// sorted by due date, most overdue first.
    pub fn build<'a, I>(cards: I, now: DateTime<Utc>, limits: QueueLimits) -> Self
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let mut new_cards = Vec::new();
        let mut review_cards = Vec::new();
        for card in cards {
            if card.status() == CardStatus::New {
                new_cards.push(card.clone());
            } else if is_due(card, now) {
                review_cards.push(card.clone());
            }
        }
        review_cards.sort_by_key(|card| card.next_review);

        let new_remaining = new_cards.len().saturating_sub(limits.new_cards);
        let review_remaining = review_cards.len().saturating_sub(limits.reviews);
        new_cards.truncate(limits.new_cards);
        review_cards.truncate(limits.reviews);

        Self {
            new_cards,
            review_cards,
            new_remaining,
            review_remaining,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.new_cards.is_empty() && self.review_cards.is_empty()
    }
}

/// Card counts per status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total: usize,
    pub new: usize,
    pub learning: usize,
    pub review: usize,
    pub relearning: usize,
    pub due: usize,
    pub lapses: u64,
}

impl CollectionStats {
    pub fn tally<'a, I>(cards: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let mut stats = Self::default();
        for card in cards {
            stats.total += 1;
            match card.status() {
                CardStatus::New => stats.new += 1,
                CardStatus::Learning => stats.learning += 1,
                CardStatus::Review => stats.review += 1,
                CardStatus::Relearning => stats.relearning += 1,
            }
            if is_due(card, now) {
                stats.due += 1;
            }
            stats.lapses += u64::from(card.lapses);
        }
        stats
    }
}
