//! Collection statistics endpoint

use axum::{extract::State, Json};
use chrono::Utc;
use stepcards_core::CardStore;

use crate::error::Result;
use crate::models::CollectionStats;
use crate::AppState;

/// GET /api/stats
pub async fn get(State(state): State<AppState>) -> Result<Json<CollectionStats>> {
    let cards = state.cards.list()?;
    Ok(Json(CollectionStats::tally(&cards, Utc::now())))
}
