//! DTOs for the shorten and retrieve endpoints.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/shorten`.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

/// Response body for a created short id.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub id: String,
}

/// Response body for a resolved short id.
#[derive(Debug, Serialize)]
pub struct RetrieveResponse {
    pub url: String,
}
