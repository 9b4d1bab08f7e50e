//! Application layer orchestrating the shorten and retrieve operations.
//!
//! This layer coordinates the key generator, the durable store and the cache
//! behind a small API consumed by the HTTP handlers.
//!
//! - [`services::ShortenerService`] - Shorten/retrieve orchestration
//! - [`ServiceConfig`] - Validated service settings
//! - [`metrics`] - Operation metrics side channel

pub mod error;
pub mod metrics;
pub mod service_config;
pub mod services;

pub use error::ShortenerError;
pub use service_config::{ConfigError, ServiceConfig};
