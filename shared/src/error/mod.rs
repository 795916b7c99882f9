//! Unified error system for the employee service
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`ErrorCategory`]: Classification of errors by range
//! - [`AppError`]: Error type carried through handlers and services
//! - [`ErrorBody`]: JSON body written for every error response
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::employee_not_found(7);
//! assert_eq!(err.code, ErrorCode::EmployeeNotFound);
//! assert_eq!(err.http_status().as_u16(), 404);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
