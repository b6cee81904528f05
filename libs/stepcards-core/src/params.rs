//! Scheduling parameters and their validation.
//!
//! One `Parameters` value is shared by every card. It is passed explicitly to
//! each scheduling call, so edits take effect on the next review only.

use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, ParameterErrors};
use crate::types::DEFAULT_EASE_FACTOR;

/// Timing and ease configuration for the SM-2 style scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    /// Step delays in minutes for first-time learning.
    pub learning_steps: Vec<u32>,
    /// Step delays in minutes after a lapse.
    pub relearning_steps: Vec<u32>,
    /// Days assigned when a card leaves learning with GOOD.
    pub graduating_interval: u32,
    /// Days assigned when a card leaves learning with EASY.
    pub easy_interval: u32,
    pub easy_bonus: f64,
    pub hard_interval_multiplier: f64,
    /// Share of the review interval kept after a lapse.
    pub lapse_interval: f64,
    pub min_ease_factor: f64,
    pub ease_factor_increment: f64,
    pub ease_factor_decrement: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            learning_steps: vec![1, 10],
            relearning_steps: vec![10],
            graduating_interval: 1,
            easy_interval: 4,
            easy_bonus: 1.3,
            hard_interval_multiplier: 1.2,
            lapse_interval: 0.0,
            min_ease_factor: 1.3,
            ease_factor_increment: 0.15,
            ease_factor_decrement: 0.2,
        }
    }
}

impl Parameters {
    /// Check every constraint and report all violations at once.
    pub fn validate(&self) -> Result<(), ParameterErrors> {
        let mut errors = Vec::new();

        check_steps("learning_steps", &self.learning_steps, &mut errors);
        check_steps("relearning_steps", &self.relearning_steps, &mut errors);

        if self.graduating_interval == 0 {
            errors.push(ParameterError::NotPositive {
                field: "graduating_interval",
                value: 0.0,
            });
        }
        if self.easy_interval < self.graduating_interval {
            errors.push(ParameterError::EasyBelowGraduating {
                easy: self.easy_interval,
                graduating: self.graduating_interval,
            });
        }

        if check_finite("easy_bonus", self.easy_bonus, &mut errors) && self.easy_bonus < 1.0 {
            errors.push(ParameterError::EasyBonusBelowOne(self.easy_bonus));
        }

        if check_finite(
            "hard_interval_multiplier",
            self.hard_interval_multiplier,
            &mut errors,
        ) && self.hard_interval_multiplier <= 0.0
        {
            errors.push(ParameterError::NotPositive {
                field: "hard_interval_multiplier",
                value: self.hard_interval_multiplier,
            });
        }

        if check_finite("lapse_interval", self.lapse_interval, &mut errors)
            && !(0.0..=1.0).contains(&self.lapse_interval)
        {
            errors.push(ParameterError::LapseIntervalOutOfRange(self.lapse_interval));
        }

        if check_finite("min_ease_factor", self.min_ease_factor, &mut errors) {
            if self.min_ease_factor <= 0.0 {
                errors.push(ParameterError::NotPositive {
                    field: "min_ease_factor",
                    value: self.min_ease_factor,
                });
            } else if self.min_ease_factor >= DEFAULT_EASE_FACTOR {
                errors.push(ParameterError::MinEaseNotBelowStart {
                    min: self.min_ease_factor,
                    start: DEFAULT_EASE_FACTOR,
                });
            }
        }

        for (field, value) in [
            ("ease_factor_increment", self.ease_factor_increment),
            ("ease_factor_decrement", self.ease_factor_decrement),
        ] {
            if check_finite(field, value, &mut errors) && value < 0.0 {
                errors.push(ParameterError::Negative { field, value });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ParameterErrors(errors))
        }
    }
}

/// Validate parameters, returning every violation.
pub fn validate(params: &Parameters) -> Result<(), ParameterErrors> {
    params.validate()
}

fn check_steps(field: &'static str, steps: &[u32], errors: &mut Vec<ParameterError>) {
    if steps.is_empty() {
        errors.push(ParameterError::EmptySteps { field });
        return;
    }
    for (index, step) in steps.iter().enumerate() {
        if *step == 0 {
            errors.push(ParameterError::ZeroStep { field, index });
        }
    }
}

fn check_finite(field: &'static str, value: f64, errors: &mut Vec<ParameterError>) -> bool {
    if value.is_finite() {
        true
    } else {
        errors.push(ParameterError::NotFinite { field });
        false
    }
}
