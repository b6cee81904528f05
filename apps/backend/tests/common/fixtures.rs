//! Test fixtures and factory functions for creating test data.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use stepcards_core::{Card, CardState};

/// Fixed instant used as "now" for deterministic reviews.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn create_card_request(front: &str, back: &str) -> Value {
    json!({ "front": front, "back": back })
}

/// Review request with an explicit timestamp.
pub fn submit_review_request(card_id: Uuid, rating: u8, reviewed_at: DateTime<Utc>) -> Value {
    json!({
        "card_id": card_id,
        "rating": rating,
        "reviewed_at": reviewed_at,
    })
}

/// A graduated card that was last reviewed at `epoch()` and is due now.
pub fn review_card(interval_days: u32, ease_factor: f64) -> Card {
    Card {
        state: CardState::Review { interval_days },
        ease_factor,
        iteration: 3,
        last_review: Some(epoch()),
        next_review: Some(epoch() + Duration::days(i64::from(interval_days))),
        ..Card::new("Hauptstadt von Frankreich?", "Paris")
    }
}

/// A graduated card whose due date is `hours_from_now` relative to the wall clock.
pub fn scheduled_card(front: &str, hours_from_now: i64) -> Card {
    let now = Utc::now();
    Card {
        state: CardState::Review { interval_days: 2 },
        iteration: 2,
        last_review: Some(now - Duration::days(2)),
        next_review: Some(now + Duration::hours(hours_from_now)),
        ..Card::new(front, "answer")
    }
}
