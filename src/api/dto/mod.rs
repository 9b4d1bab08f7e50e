//! Data Transfer Objects for API request/response serialization.

pub mod health;
pub mod shorten;
