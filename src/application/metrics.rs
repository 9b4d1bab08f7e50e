//! Operation metrics emitted through the `metrics` facade.
//!
//! Recording never blocks or fails; without an installed recorder every call
//! is a no-op.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Logical operation exposed by the shortener service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Shorten,
    Retrieve,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shorten => "shorten",
            Self::Retrieve => "retrieve",
        }
    }
}

/// Success/failure classification of a finished operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

/// Cache interaction observed while serving an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    Hit,
    Miss,
    Error,
    WriteFailed,
}

impl CacheEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Error => "error",
            Self::WriteFailed => "write_failed",
        }
    }
}

/// Side channel for per-operation observations.
#[cfg_attr(test, mockall::automock)]
pub trait MetricsRecorder: Send + Sync {
    /// Records the outcome and latency of one service call.
    fn record_operation(&self, operation: Operation, outcome: Outcome, elapsed: Duration);

    /// Records a cache hit, miss, read error or failed write.
    fn record_cache_event(&self, operation: Operation, event: CacheEvent);
}

/// [`MetricsRecorder`] backed by the global `metrics` recorder.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacadeMetrics;

impl FacadeMetrics {
    pub const OPERATIONS_TOTAL: &'static str = "urls_operations_total";
    pub const OPERATION_DURATION: &'static str = "urls_operation_duration_seconds";
    pub const CACHE_EVENTS_TOTAL: &'static str = "urls_cache_events_total";

    /// Registers metric descriptions with the installed recorder.
    pub fn describe() {
        describe_counter!(
            Self::OPERATIONS_TOTAL,
            "Shorten/retrieve calls by method and status"
        );
        describe_histogram!(
            Self::OPERATION_DURATION,
            metrics::Unit::Seconds,
            "Shorten/retrieve latency by method and status"
        );
        describe_counter!(
            Self::CACHE_EVENTS_TOTAL,
            "Cache hits, misses, read errors and failed writes"
        );
    }
}

impl MetricsRecorder for FacadeMetrics {
    fn record_operation(&self, operation: Operation, outcome: Outcome, elapsed: Duration) {
        counter!(
            Self::OPERATIONS_TOTAL,
            "method" => operation.as_str(),
            "status" => outcome.as_str()
        )
        .increment(1);

        histogram!(
            Self::OPERATION_DURATION,
            "method" => operation.as_str(),
            "status" => outcome.as_str()
        )
        .record(elapsed.as_secs_f64());
    }

    fn record_cache_event(&self, operation: Operation, event: CacheEvent) {
        counter!(
            Self::CACHE_EVENTS_TOTAL,
            "operation" => operation.as_str(),
            "result" => event.as_str()
        )
        .increment(1);
    }
}
