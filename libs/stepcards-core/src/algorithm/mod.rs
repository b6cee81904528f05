//! Spaced repetition scheduling.
//!
//! [`review`] is the only operation that changes a card's scheduling state.
//! It is a pure function: the caller loads the card, passes in the current
//! parameters and the review instant, and persists the returned card.

pub mod sm2;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SchedulerError};
use crate::params::Parameters;
use crate::types::{Card, CardState, Rating};

/// Compute the card's state after it was rated `rating` at `now`.
///
/// The input card is never modified; on success a complete new card is
/// returned. Reviews of the same card must be serialized by the caller: the
/// card passed in is assumed to be the latest persisted value.
///
/// # Errors
/// - [`SchedulerError::InvalidParameters`] if `params` fail validation.
/// - [`SchedulerError::InvalidTimestamp`] if `now` is before the card's last review.
/// - [`SchedulerError::DueDateOutOfRange`] if the new interval overflows the calendar.
pub fn review(card: &Card, rating: Rating, now: DateTime<Utc>, params: &Parameters) -> Result<Card> {
    if let Err(errors) = params.validate() {
        warn!(card_id = %card.id, %errors, "refusing to schedule with invalid parameters");
        return Err(errors.into());
    }
    if let Some(last_review) = card.last_review {
        if now < last_review {
            warn!(card_id = %card.id, %now, %last_review, "review timestamp precedes last review");
            return Err(SchedulerError::InvalidTimestamp { now, last_review });
        }
    }

    let transition = sm2::transition(card.state, card.ease_factor, rating, params);
    let next_review = now
        .checked_add_signed(transition.delay.to_duration())
        .ok_or(SchedulerError::DueDateOutOfRange { card_id: card.id })?;

    debug!(
        card_id = %card.id,
        ?rating,
        from = card.status().as_str(),
        to = transition.state.status().as_str(),
        ease_factor = transition.ease_factor,
        %next_review,
        "card reviewed"
    );

    Ok(Card {
        state: transition.state,
        ease_factor: transition.ease_factor,
        iteration: card.iteration + 1,
        lapses: card.lapses + u32::from(transition.lapsed),
        last_review: Some(now),
        next_review: Some(next_review),
        ..card.clone()
    })
}

/// Whether the card should be shown at `now`.
pub fn is_due(card: &Card, now: DateTime<Utc>) -> bool {
    match (card.state, card.next_review) {
        (CardState::New, _) | (_, None) => true,
        (_, Some(due)) => now >= due,
    }
}

/// Due instants each rating would produce, for labelling answer buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPreview {
    pub again: DateTime<Utc>,
    pub hard: DateTime<Utc>,
    pub good: DateTime<Utc>,
    pub easy: DateTime<Utc>,
}

impl ReviewPreview {
    pub fn get(&self, rating: Rating) -> DateTime<Utc> {
        match rating {
            Rating::Again => self.again,
            Rating::Hard => self.hard,
            Rating::Good => self.good,
            Rating::Easy => self.easy,
        }
    }
}

/// Run every rating through [`review`] without keeping the results.
pub fn preview(card: &Card, now: DateTime<Utc>, params: &Parameters) -> Result<ReviewPreview> {
    let due = |rating| -> Result<DateTime<Utc>> {
        let next = review(card, rating, now, params)?;
        // review always sets the due date
        Ok(next.next_review.unwrap_or(now))
    };
    Ok(ReviewPreview {
        again: due(Rating::Again)?,
        hard: due(Rating::Hard)?,
        good: due(Rating::Good)?,
        easy: due(Rating::Easy)?,
    })
}
