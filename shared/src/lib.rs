//! Shared types for the catalog workspace
//!
//! Wire models (attributes, attribute sets, product payloads), the unified
//! error system, and price normalization helpers used by both the editor
//! core and the HTTP client.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
