//! Card endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use stepcards_core::CardStore;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/cards
pub async fn list(State(state): State<AppState>) -> Result<Json<CardListResponse>> {
    let cards = state.cards.list()?;
    Ok(Json(CardListResponse { cards }))
}

/// POST /api/cards
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateCardRequest>,
) -> Result<Json<Card>> {
    if payload.front.trim().is_empty() {
        return Err(ApiError::BadRequest("front must not be empty".to_string()));
    }

    let card = state
        .save_card(Card::new(payload.front, payload.back))
        .await?;

    tracing::info!("Created card {}", card.id);

    Ok(Json(card))
}

/// GET /api/cards/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Card>> {
    let card = state
        .cards
        .load(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Card {id}")))?;
    Ok(Json(card))
}

/// PATCH /api/cards/:id
/// Edits the text only; scheduling state is left as is.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCardRequest>,
) -> Result<Json<Card>> {
    let _guard = state.review_lock.lock().await;

    let mut card = state
        .cards
        .load(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Card {id}")))?;

    if let Some(front) = payload.front {
        if front.trim().is_empty() {
            return Err(ApiError::BadRequest("front must not be empty".to_string()));
        }
        card.front = front;
    }
    if let Some(back) = payload.back {
        card.back = back;
    }
    let card = state.save_card(card).await?;

    Ok(Json(card))
}

/// DELETE /api/cards/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let _guard = state.review_lock.lock().await;
    let deleted = state.remove_card(id).await?;

    if deleted {
        tracing::info!("Deleted card {}", id);
    }

    Ok(Json(serde_json::json!({ "deleted": deleted })))
}
