//! HTTP middleware for request processing.
//!
//! Provides request tracing and deadline enforcement.

pub mod timeout;
pub mod tracing;
