//! Settings endpoints

use axum::{extract::State, Json};
use stepcards_core::ParameterSource;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/settings
pub async fn get(State(state): State<AppState>) -> Json<Parameters> {
    Json(state.settings.current())
}

/// PUT /api/settings
/// Applies the provided fields; the whole update is rejected if the result is invalid.
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateParametersRequest>,
) -> Result<Json<Parameters>> {
    let _guard = state.review_lock.lock().await;
    let current = state.settings.current();
    let updated = state.settings.replace(request.apply(&current))?;
    Ok(Json(updated))
}
