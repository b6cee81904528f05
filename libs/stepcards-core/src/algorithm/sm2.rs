//! SM-2 transition table with learning and relearning steps.
//!
//! Cards move between NEW, LEARNING, REVIEW and RELEARNING. Learning states
//! count down minute-based steps; REVIEW grows a day interval by the ease
//! factor.

use chrono::Duration;

use crate::params::Parameters;
use crate::types::{CardState, Rating};

/// How far in the future the next review lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delay {
    Minutes(u32),
    Days(u32),
}

impl Delay {
    pub(crate) fn to_duration(self) -> Duration {
        match self {
            Self::Minutes(minutes) => Duration::minutes(i64::from(minutes)),
            Self::Days(days) => Duration::days(i64::from(days)),
        }
    }
}

/// Outcome of applying one rating, before timestamps are attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Transition {
    pub state: CardState,
    pub ease_factor: f64,
    pub delay: Delay,
    pub lapsed: bool,
}

enum StepOutcome {
    Stay(usize),
    Graduate(u32),
}

/// Apply `rating` to a card in `state` with the given ease factor.
///
/// Parameters must already be validated: both step sequences are non-empty.
pub(crate) fn transition(
    state: CardState,
    ease_factor: f64,
    rating: Rating,
    params: &Parameters,
) -> Transition {
    let mut lapsed = false;
    let mut ease = ease_factor;

    let (state, delay) = match state {
        // A new card starts on the first learning step and is rated there.
        CardState::New => learning(0, rating, params),
        CardState::Learning { step_index } => learning(step_index, rating, params),
        CardState::Relearning {
            step_index,
            interval_days,
        } => {
            let steps = &params.relearning_steps;
            match climb(steps, step_index, rating, interval_days, interval_days) {
                StepOutcome::Stay(step_index) => (
                    CardState::Relearning {
                        step_index,
                        interval_days,
                    },
                    Delay::Minutes(steps[step_index]),
                ),
                StepOutcome::Graduate(days) => graduate(days),
            }
        }
        CardState::Review { interval_days } => match rating {
            Rating::Again => {
                lapsed = true;
                ease -= params.ease_factor_decrement;
                let pending = scale_interval(interval_days, params.lapse_interval);
                (
                    CardState::Relearning {
                        step_index: 0,
                        interval_days: pending,
                    },
                    Delay::Minutes(params.relearning_steps[0]),
                )
            }
            Rating::Hard => {
                graduate(scale_interval(interval_days, params.hard_interval_multiplier))
            }
            // A successful review always moves the card at least one day further out.
            Rating::Good => graduate(
                scale_interval(interval_days, ease).max(interval_days.saturating_add(1)),
            ),
            Rating::Easy => {
                ease += params.ease_factor_increment;
                graduate(scale_interval(interval_days, ease * params.easy_bonus))
            }
        },
    };

    Transition {
        state,
        ease_factor: ease.max(params.min_ease_factor),
        delay,
        lapsed,
    }
}

fn learning(step_index: usize, rating: Rating, params: &Parameters) -> (CardState, Delay) {
    let steps = &params.learning_steps;
    match climb(
        steps,
        step_index,
        rating,
        params.graduating_interval,
        params.easy_interval,
    ) {
        StepOutcome::Stay(step_index) => (
            CardState::Learning { step_index },
            Delay::Minutes(steps[step_index]),
        ),
        StepOutcome::Graduate(days) => graduate(days),
    }
}

/// Enter REVIEW. A card is never scheduled less than a day out, even when a
/// stored relearning record carries a zero interval.
fn graduate(interval_days: u32) -> (CardState, Delay) {
    let interval_days = interval_days.max(1);
    (
        CardState::Review { interval_days },
        Delay::Days(interval_days),
    )
}

/// Move along a step ladder. An index left over from a longer, since edited
/// sequence is treated as the last step.
fn climb(steps: &[u32], step_index: usize, rating: Rating, good: u32, easy: u32) -> StepOutcome {
    let current = step_index.min(steps.len().saturating_sub(1));
    match rating {
        Rating::Again => StepOutcome::Stay(0),
        Rating::Hard => StepOutcome::Stay(current),
        Rating::Good if current + 1 < steps.len() => StepOutcome::Stay(current + 1),
        Rating::Good => StepOutcome::Graduate(good),
        Rating::Easy => StepOutcome::Graduate(easy),
    }
}

/// `max(1, round(interval * factor))`, rounding halves up.
pub(crate) fn scale_interval(interval_days: u32, factor: f64) -> u32 {
    let scaled = (f64::from(interval_days) * factor).round();
    // `as` saturates at u32::MAX for oversized products.
    scaled.max(1.0) as u32
}
