//! Shared types for SIREST
//!
//! Domain models, the order lifecycle, money math, validation and the error
//! taxonomy used by both the client library and the role console.

pub mod client;
pub mod demo;
pub mod error;
pub mod models;
pub mod money;
pub mod order;
pub mod response;
pub mod validation;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
