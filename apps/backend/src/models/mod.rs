//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stepcards_core::SchedulerError;
use uuid::Uuid;

pub use stepcards_core::{
    Card, CardState, CardStatus, CollectionStats, Parameters, Rating, ReviewPreview, StudyQueue,
};

// Card types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateCardRequest {
    pub front: Option<String>,
    pub back: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardListResponse {
    pub cards: Vec<Card>,
}

// Study types
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StudyQueueQuery {
    pub new_limit: Option<usize>,
    pub review_limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub card_id: Uuid,
    /// 1 = again, 2 = hard, 3 = good, 4 = easy, or the rating name.
    /// Kept as raw JSON so every malformed rating is reported as a rating error.
    pub rating: Value,
    /// Defaults to the time the request is handled.
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl SubmitReviewRequest {
    pub fn rating(&self) -> Result<Rating, SchedulerError> {
        match &self.rating {
            Value::Number(number) => match number.as_i64() {
                Some(value) => Rating::try_from(value),
                None => Err(SchedulerError::UnknownRating(number.to_string())),
            },
            Value::String(name) => name.parse(),
            other => Err(SchedulerError::UnknownRating(other.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    pub card: Card,
    pub next_due: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub card_id: Uuid,
    pub due: ReviewPreview,
}

// Settings types

/// Partial parameter update; omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateParametersRequest {
    pub learning_steps: Option<Vec<u32>>,
    pub relearning_steps: Option<Vec<u32>>,
    pub graduating_interval: Option<u32>,
    pub easy_interval: Option<u32>,
    pub easy_bonus: Option<f64>,
    pub hard_interval_multiplier: Option<f64>,
    pub lapse_interval: Option<f64>,
    pub min_ease_factor: Option<f64>,
    pub ease_factor_increment: Option<f64>,
    pub ease_factor_decrement: Option<f64>,
}

impl UpdateParametersRequest {
    /// Overlay the provided fields on `current`.
    pub fn apply(self, current: &Parameters) -> Parameters {
        Parameters {
            learning_steps: self
                .learning_steps
                .unwrap_or_else(|| current.learning_steps.clone()),
            relearning_steps: self
                .relearning_steps
                .unwrap_or_else(|| current.relearning_steps.clone()),
            graduating_interval: self
                .graduating_interval
                .unwrap_or(current.graduating_interval),
            easy_interval: self.easy_interval.unwrap_or(current.easy_interval),
            easy_bonus: self.easy_bonus.unwrap_or(current.easy_bonus),
            hard_interval_multiplier: self
                .hard_interval_multiplier
                .unwrap_or(current.hard_interval_multiplier),
            lapse_interval: self.lapse_interval.unwrap_or(current.lapse_interval),
            min_ease_factor: self.min_ease_factor.unwrap_or(current.min_ease_factor),
            ease_factor_increment: self
                .ease_factor_increment
                .unwrap_or(current.ease_factor_increment),
            ease_factor_decrement: self
                .ease_factor_decrement
                .unwrap_or(current.ease_factor_decrement),
        }
    }
}
