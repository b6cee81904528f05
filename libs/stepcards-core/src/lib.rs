//! Spaced repetition scheduling engine.
//!
//! Provides:
//! - The card state machine (NEW, LEARNING, REVIEW, RELEARNING) and the
//!   SM-2 transition applied on every review
//! - Scheduling parameters with validation
//! - Study queue assembly and collection statistics
//! - Storage and settings collaborator traits

pub mod algorithm;
pub mod error;
pub mod params;
pub mod queue;
pub mod storage;
pub mod types;

pub use algorithm::{is_due, preview, review, ReviewPreview};
pub use error::{
    InvariantError, ParameterError, ParameterErrors, Result, SchedulerError, StoreError,
};
pub use params::{validate, Parameters};
pub use queue::{CollectionStats, QueueLimits, StudyQueue};
pub use storage::{CardStore, Cards, MemoryStore, ParameterSource};
pub use types::{Card, CardState, CardStatus, Rating, DEFAULT_EASE_FACTOR};
