//! API route configuration.

use crate::api::handlers::{retrieve_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Shorten and retrieve routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create a short id for a URL
/// - `GET  /shorten/{id}`  - Resolve a short id
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/shorten/{id}", get(retrieve_handler))
}
