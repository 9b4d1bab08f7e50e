//! HTTP request handlers for API endpoints.

pub mod health;
pub mod retrieve;
pub mod shorten;

pub use health::health_handler;
pub use retrieve::retrieve_handler;
pub use shorten::shorten_handler;
