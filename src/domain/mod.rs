//! Domain layer containing business entities and port definitions.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Durable store port (trait) and its error taxonomy
//! - [`key_generator`] - Pure short identifier derivation
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Port traits define contracts implemented by the infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod entities;
pub mod key_generator;
pub mod repositories;
