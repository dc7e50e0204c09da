//! # API Shared
//!
//! Wire types for the Remote Home Check HTTP API.
//!
//! Contains:
//! - Request/response DTOs with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//!
//! Kept free of domain crates so the JSON contract can be read in one place.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
