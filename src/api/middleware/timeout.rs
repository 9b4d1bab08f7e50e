//! Per-request deadline.

use axum::http::StatusCode;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Creates a layer that aborts requests running longer than `timeout`.
///
/// The handler future is dropped when the deadline passes, which cancels any
/// store or cache call still in flight. The client receives
/// `504 Gateway Timeout`.
pub fn layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, timeout)
}
