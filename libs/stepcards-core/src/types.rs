//! Core types for the scheduling engine.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{InvariantError, SchedulerError};

/// Ease factor every card starts with.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Card learning status, without per-state payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    New,
    Learning,
    Review,
    Relearning,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Review => "review",
            Self::Relearning => "relearning",
        }
    }
}

/// Rating for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Self::Again, Self::Hard, Self::Good, Self::Easy];

    /// Convert to 4-point numeric value (1-4).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }

    /// Create from 4-point numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(SchedulerError::InvalidRating(i64::from(value)))
    }
}

impl TryFrom<i64> for Rating {
    type Error = SchedulerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_value)
            .ok_or(SchedulerError::InvalidRating(value))
    }
}

impl FromStr for Rating {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" | "1" => Ok(Self::Again),
            "hard" | "2" => Ok(Self::Hard),
            "good" | "3" => Ok(Self::Good),
            "easy" | "4" => Ok(Self::Easy),
            _ => Err(SchedulerError::UnknownRating(s.to_string())),
        }
    }
}

/// Scheduling state with the data that is only meaningful in that state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CardState {
    /// Never reviewed.
    New,
    /// Working through the learning steps.
    Learning { step_index: usize },
    /// Graduated, scheduled in whole days.
    Review { interval_days: u32 },
    /// Working through the relearning steps after a lapse.
    /// `interval_days` is the interval restored on re-graduation.
    Relearning {
        step_index: usize,
        interval_days: u32,
    },
}

impl Default for CardState {
    fn default() -> Self {
        Self::New
    }
}

impl CardState {
    pub fn status(&self) -> CardStatus {
        match self {
            Self::New => CardStatus::New,
            Self::Learning { .. } => CardStatus::Learning,
            Self::Review { .. } => CardStatus::Review,
            Self::Relearning { .. } => CardStatus::Relearning,
        }
    }
}

/// One fact being learned, together with its scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    pub state: CardState,
    pub ease_factor: f64,
    pub iteration: u32,
    #[serde(default)]
    pub lapses: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
}

impl Card {
    /// Create a never-reviewed card with a fresh id.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            front: front.into(),
            back: back.into(),
            state: CardState::New,
            ease_factor: DEFAULT_EASE_FACTOR,
            iteration: 0,
            lapses: 0,
            last_review: None,
            next_review: None,
        }
    }

    pub fn status(&self) -> CardStatus {
        self.state.status()
    }

    /// Index into the active step sequence, 0 outside learning states.
    pub fn step_index(&self) -> usize {
        match self.state {
            CardState::Learning { step_index } | CardState::Relearning { step_index, .. } => {
                step_index
            }
            CardState::New | CardState::Review { .. } => 0,
        }
    }

    /// Current review interval in days, 0 outside REVIEW.
    pub fn interval_days(&self) -> u32 {
        match self.state {
            CardState::Review { interval_days } => interval_days,
            _ => 0,
        }
    }

    /// Check that the state, review count and review dates agree.
    ///
    /// Storage adapters call this after loading a card so a corrupt record
    /// is reported instead of being scheduled.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let card_id = self.id;
        let status = self.status().as_str();
        let is_new = self.status() == CardStatus::New;
        if is_new != (self.iteration == 0) {
            return Err(InvariantError::IterationMismatch {
                card_id,
                status,
                iteration: self.iteration,
            });
        }
        if is_new != self.last_review.is_none() {
            return Err(InvariantError::LastReviewMismatch {
                card_id,
                status,
                last_review: self.last_review,
            });
        }
        if !is_new && self.next_review.is_none() {
            return Err(InvariantError::MissingDueDate { card_id });
        }
        if !self.ease_factor.is_finite() || self.ease_factor <= 0.0 {
            return Err(InvariantError::InvalidEaseFactor {
                card_id,
                ease_factor: self.ease_factor,
            });
        }
        match self.state {
            CardState::Review { interval_days: 0 }
            | CardState::Relearning {
                interval_days: 0, ..
            } => Err(InvariantError::ZeroInterval { card_id, status }),
            _ => Ok(()),
        }
    }
}
