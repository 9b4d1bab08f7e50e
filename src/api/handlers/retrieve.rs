//! Handler for short id resolution.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::shorten::RetrieveResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short id to its original URL.
///
/// # Endpoint
///
/// `GET /api/shorten/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the id doesn't exist.
/// Returns 500 Internal Server Error on storage failures.
pub async fn retrieve_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RetrieveResponse>, AppError> {
    let url = state.shortener.retrieve(&id).await?;

    Ok(Json(RetrieveResponse { url }))
}
