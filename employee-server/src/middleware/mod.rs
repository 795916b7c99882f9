//! HTTP middleware
//!
//! - [`logging_middleware`] - one log line per request and response
//! - [`error_path_middleware`] - fills `path` in JSON error bodies

pub mod error_path;
pub mod logging;

pub use error_path::error_path_middleware;
pub use logging::logging_middleware;
