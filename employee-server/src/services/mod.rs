//! Service layer
//!
//! - [`EmployeeService`] - employee CRUD and queries

pub mod employee;

pub use employee::EmployeeService;
