//! Shared types for the employee service
//!
//! Domain models and the error system used by the server crate and its tests.

pub mod error;
pub mod models;

pub use error::{AppError, AppResult, ErrorBody, ErrorCode};
pub use models::{CityCount, DepartmentSalary, Employee, EmployeePayload};
