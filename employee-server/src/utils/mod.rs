//! Utilities - logging setup and re-exported error types
//!
//! - [`AppError`] - application error type (from shared::error)
//! - [`ErrorBody`] - JSON error body (from shared::error)
//! - [`logger`] - tracing subscriber setup

pub mod logger;
pub mod result;

pub use result::AppResult;
pub use shared::error::{AppError, ErrorBody, ErrorCategory, ErrorCode};
