//! # API Shared
//!
//! Shared request/response definitions for the E2S amenity API.
//!
//! Contains:
//! - Wire DTOs with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//!
//! Used by the server binary and the CLI for common functionality.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
