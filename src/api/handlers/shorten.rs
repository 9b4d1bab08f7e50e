//! Handler for URL shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short id for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "id": "IYVyA3cG" }
/// ```
///
/// The URL is stored as given; it is neither validated nor normalized.
///
/// # Errors
///
/// Returns 400 Bad Request if `url` is empty.
/// Returns 503 Service Unavailable if no unique id could be allocated.
/// Returns 500 Internal Server Error on storage failures.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    if payload.url.is_empty() {
        return Err(AppError::bad_request(
            "Field 'url' must not be empty",
            json!({ "field": "url" }),
        ));
    }

    let id = state.shortener.shorten(&payload.url).await?;

    Ok((StatusCode::CREATED, Json(ShortenResponse { id })))
}
