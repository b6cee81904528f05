//! Study endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use stepcards_core::{
    preview as preview_review, review as apply_review, CardStore, ParameterSource, QueueLimits,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/study/queue
pub async fn queue(
    State(state): State<AppState>,
    Query(query): Query<StudyQueueQuery>,
) -> Result<Json<StudyQueue>> {
    let limits = QueueLimits {
        new_cards: query.new_limit.unwrap_or(state.queue_limits.new_cards),
        reviews: query.review_limit.unwrap_or(state.queue_limits.reviews),
    };
    let cards = state.cards.list()?;
    Ok(Json(StudyQueue::build(&cards, Utc::now(), limits)))
}

/// POST /api/study/review
pub async fn review(
    State(state): State<AppState>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>> {
    // Reject bad ratings before touching the card.
    let rating = payload.rating()?;
    let now = payload.reviewed_at.unwrap_or_else(Utc::now);

    // Load, schedule and persist as one step so reviews of a card never interleave.
    let _guard = state.review_lock.lock().await;

    let card = state
        .cards
        .load(payload.card_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Card {}", payload.card_id)))?;

    let params = state.settings.current();
    let next = apply_review(&card, rating, now, &params)?;
    let next = state.save_card(next).await?;

    tracing::info!(
        card_id = %next.id,
        rating = ?rating,
        status = next.status().as_str(),
        "Recorded review"
    );

    // review always sets the due date
    let next_due = next.next_review.unwrap_or(now);
    Ok(Json(SubmitReviewResponse {
        card: next,
        next_due,
    }))
}

/// GET /api/study/preview/:id
pub async fn preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PreviewResponse>> {
    let card = state
        .cards
        .load(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Card {id}")))?;

    // A review may have been recorded with a timestamp ahead of the wall clock.
    let now = match card.last_review {
        Some(last_review) => last_review.max(Utc::now()),
        None => Utc::now(),
    };
    let params = state.settings.current();
    let due = preview_review(&card, now, &params)?;

    Ok(Json(PreviewResponse { card_id: id, due }))
}
