use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::RecommendationResponse;
use crate::services::recommendations;

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub movies: Vec<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Generates movie recommendations from the submitted titles
///
/// Bodies that fail to parse as `{ "movies": [...] }` are rejected with a
/// 400 before the service layer runs.
pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Rejected malformed request body");
        AppError::InvalidInput("Please provide an array of movie titles".to_string())
    })?;

    let response = recommendations::recommend(state.catalog.clone(), request.movies).await?;

    Ok(Json(response))
}
