//! Employee Model

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{Validate, ValidateEmail, ValidationError};

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

/// Employee entity (row of the `employees` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub emp_code: String,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub designation: String,
    pub email: String,
    pub salary: f64,
    pub phone_number: String,
    pub address: String,
    pub city: String,
}

/// Create / update payload
///
/// Every field defaults when absent so that validation can report all
/// missing fields at once instead of failing on the first one. Any `id`
/// in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeePayload {
    #[validate(custom(function = "not_blank", message = "Employee code is required"))]
    pub emp_code: String,

    #[validate(custom(function = "not_blank", message = "First name is required"))]
    pub first_name: String,

    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    pub last_name: String,

    #[validate(custom(function = "not_blank", message = "Department is required"))]
    pub department: String,

    #[validate(custom(function = "not_blank", message = "Designation is required"))]
    pub designation: String,

    #[validate(custom(function = "required_email"))]
    pub email: String,

    #[validate(range(exclusive_min = 0.0, message = "Salary must be positive"))]
    pub salary: f64,

    #[validate(regex(path = *PHONE_NUMBER, message = "Phone number must be 10 digits"))]
    pub phone_number: String,

    #[validate(custom(function = "not_blank", message = "Address is required"))]
    pub address: String,

    #[validate(custom(function = "not_blank", message = "City is required"))]
    pub city: String,
}

impl From<Employee> for EmployeePayload {
    fn from(e: Employee) -> Self {
        Self {
            emp_code: e.emp_code,
            first_name: e.first_name,
            last_name: e.last_name,
            department: e.department,
            designation: e.designation,
            email: e.email,
            salary: e.salary,
            phone_number: e.phone_number,
            address: e.address,
            city: e.city,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Blank e-mails report only "required"; the shape check runs on non-blank values.
fn required_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message(Cow::from("Email is required")));
    }
    if !value.validate_email() {
        return Err(ValidationError::new("email").with_message(Cow::from("Email should be valid")));
    }
    Ok(())
}

/// Average salary of one department, serialized as `[department, average]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSalary(pub String, pub f64);

impl From<(String, f64)> for DepartmentSalary {
    fn from((department, average): (String, f64)) -> Self {
        Self(department, average)
    }
}

/// Number of employees in one city, serialized as `[city, count]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCount(pub String, pub i64);

impl From<(String, i64)> for CityCount {
    fn from((city, count): (String, i64)) -> Self {
        Self(city, count)
    }
}
