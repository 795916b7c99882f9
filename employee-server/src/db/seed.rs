//! Sample data bootstrap
//!
//! Called once at startup. Inserts the sample employees only when the
//! table is empty, so repeated runs leave existing data alone.

use super::repository::{RepoResult, employee};
use shared::models::EmployeePayload;
use sqlx::SqlitePool;

/// (empCode, first, last, department, designation, email, salary, phone, address, city)
type SampleRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    f64,
    &'static str,
    &'static str,
    &'static str,
);

const SAMPLE_EMPLOYEES: [SampleRow; 5] = [
    ("EMP101", "Kalai", "Selvi", "IT", "Developer", "kalai@example.com", 65000.0, "9876543210", "12, Anna Nagar", "Chennai"),
    ("EMP102", "Poojitha", "R", "Finance", "Analyst", "poojitha@corp.com", 58000.0, "9123456789", "44, Gandhi St", "Bangalore"),
    ("EMP103", "Swathi", "S", "HR", "HR Executive", "swathi@corp.com", 50000.0, "9786543210", "21, Lake View", "Hyderabad"),
    ("EMP104", "Dhivyadharshini", "M", "Marketing", "Coordinator", "dhivya@corp.com", 52000.0, "8899776655", "7, MG Road", "Pune"),
    ("EMP105", "Srivarshini", "A", "IT", "Tester", "srivarshini@corp.com", 60000.0, "9090888777", "9, Tech Park", "Chennai"),
];

/// The bootstrap rows as create payloads
pub fn sample_employees() -> Vec<EmployeePayload> {
    SAMPLE_EMPLOYEES
        .iter()
        .map(
            |&(code, first, last, dept, designation, email, salary, phone, address, city)| {
                EmployeePayload {
                    emp_code: code.into(),
                    first_name: first.into(),
                    last_name: last.into(),
                    department: dept.into(),
                    designation: designation.into(),
                    email: email.into(),
                    salary,
                    phone_number: phone.into(),
                    address: address.into(),
                    city: city.into(),
                }
            },
        )
        .collect()
}

/// Insert the sample employees if the table is empty; returns how many were inserted
pub async fn seed_if_empty(pool: &SqlitePool) -> RepoResult<usize> {
    let existing = employee::count(pool).await?;
    if existing > 0 {
        tracing::info!(existing, "Database already contains employee records, skipping seed");
        return Ok(0);
    }

    tracing::info!("Inserting sample employees into database...");
    let samples = sample_employees();
    for payload in &samples {
        employee::save(pool, None, payload).await?;
    }
    tracing::info!(count = samples.len(), "Sample employees added");
    Ok(samples.len())
}
