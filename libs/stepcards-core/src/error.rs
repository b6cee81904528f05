//! Error types for stepcards-core.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors returned by the scheduling operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(ParameterErrors),

    #[error("review at {now} precedes last review at {last_review}")]
    InvalidTimestamp {
        now: DateTime<Utc>,
        last_review: DateTime<Utc>,
    },

    #[error("invalid rating {0}, expected 1-4")]
    InvalidRating(i64),

    #[error("unknown rating {0:?}")]
    UnknownRating(String),

    #[error("next review of card {card_id} falls outside the supported date range")]
    DueDateOutOfRange { card_id: Uuid },
}

/// A single violated parameter constraint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{field} must not be empty")]
    EmptySteps { field: &'static str },

    #[error("{field}[{index}] must be greater than 0")]
    ZeroStep { field: &'static str, index: usize },

    #[error("{field} must be greater than 0, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("easy_interval ({easy}) must be at least graduating_interval ({graduating})")]
    EasyBelowGraduating { easy: u32, graduating: u32 },

    #[error("easy_bonus must be at least 1.0, got {0}")]
    EasyBonusBelowOne(f64),

    #[error("lapse_interval must be within 0.0..=1.0, got {0}")]
    LapseIntervalOutOfRange(f64),

    #[error("min_ease_factor ({min}) must be below the starting ease factor ({start})")]
    MinEaseNotBelowStart { min: f64, start: f64 },
}

/// Every violation found while validating one set of parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterErrors(pub Vec<ParameterError>);

impl ParameterErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterError> {
        self.0.iter()
    }

    /// Human-readable messages, one per violation.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ParameterErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ParameterErrors {}

impl From<ParameterErrors> for SchedulerError {
    fn from(errors: ParameterErrors) -> Self {
        Self::InvalidParameters(errors)
    }
}

/// A stored card whose fields contradict each other.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantError {
    #[error("card {card_id} is {status} with iteration {iteration}")]
    IterationMismatch {
        card_id: Uuid,
        status: &'static str,
        iteration: u32,
    },

    #[error("card {card_id} is {status} but last_review is {last_review:?}")]
    LastReviewMismatch {
        card_id: Uuid,
        status: &'static str,
        last_review: Option<DateTime<Utc>>,
    },

    #[error("card {card_id} was reviewed but has no due date")]
    MissingDueDate { card_id: Uuid },

    #[error("card {card_id} has invalid ease factor {ease_factor}")]
    InvalidEaseFactor { card_id: Uuid, ease_factor: f64 },

    #[error("card {card_id} is {status} with a zero-day interval")]
    ZeroInterval { card_id: Uuid, status: &'static str },
}

/// Errors raised by card storage collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupt card record: {0}")]
    Corrupt(#[from] InvariantError),

    #[error("card store lock poisoned")]
    Poisoned,
}
