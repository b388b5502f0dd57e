//! # API Shared
//!
//! Shared utilities and definitions for the toolbox APIs.
//!
//! Contains:
//! - The response envelope and error body (`envelope` module)
//! - Request DTOs and query-string parsing (`params` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` for common functionality.

pub mod envelope;
pub mod health;
pub mod params;

pub use envelope::{ApiErrorBody, ApiResponse};
pub use health::{HealthRes, HealthService};
