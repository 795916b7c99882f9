//! Employee Repository

use super::{RepoError, RepoResult};
use shared::models::{CityCount, DepartmentSalary, Employee, EmployeePayload};
use sqlx::SqlitePool;

const EMPLOYEE_SELECT: &str = "SELECT id, emp_code, first_name, last_name, department, designation, email, salary, phone_number, address, city FROM employees";

const RETURNING: &str = "RETURNING id, emp_code, first_name, last_name, department, designation, email, salary, phone_number, address, city";

/// Insert when `id` is `None`, otherwise overwrite every column of row `id`
pub async fn save(
    pool: &SqlitePool,
    id: Option<i64>,
    data: &EmployeePayload,
) -> RepoResult<Employee> {
    let sql = match id {
        None => format!(
            "INSERT INTO employees (emp_code, first_name, last_name, department, designation, email, salary, phone_number, address, city) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) {RETURNING}"
        ),
        Some(_) => format!(
            "UPDATE employees SET emp_code = ?1, first_name = ?2, last_name = ?3, department = ?4, designation = ?5, email = ?6, salary = ?7, phone_number = ?8, address = ?9, city = ?10 WHERE id = ?11 {RETURNING}"
        ),
    };

    let mut query = sqlx::query_as::<_, Employee>(&sql)
        .bind(&data.emp_code)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.department)
        .bind(&data.designation)
        .bind(&data.email)
        .bind(data.salary)
        .bind(&data.phone_number)
        .bind(&data.address)
        .bind(&data.city);
    if let Some(id) = id {
        query = query.bind(id);
    }

    let row = query
        .fetch_optional(pool)
        .await
        .map_err(|e| duplicate_or_database(e, &data.emp_code))?;

    match (row, id) {
        (Some(employee), _) => Ok(employee),
        (None, Some(id)) => Err(RepoError::NotFound(format!("Employee {id} not found"))),
        (None, None) => Err(RepoError::Database("Failed to create employee".into())),
    }
}

fn duplicate_or_database(err: sqlx::Error, emp_code: &str) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return RepoError::Duplicate(format!("Employee code '{emp_code}' already exists"));
    }
    err.into()
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} ORDER BY id");
    let rows = sqlx::query_as::<_, Employee>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Returns whether a row was removed; a missing id is not an error
pub async fn delete_by_id(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete_all(pool: &SqlitePool) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM employees").execute(pool).await?;
    Ok(rows.rows_affected())
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

// ── Derived queries ─────────────────────────────────────────────────

pub async fn find_by_department(pool: &SqlitePool, department: &str) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE department = ? ORDER BY id");
    let rows = sqlx::query_as::<_, Employee>(&sql)
        .bind(department)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_city(pool: &SqlitePool, city: &str) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE city = ? ORDER BY id");
    let rows = sqlx::query_as::<_, Employee>(&sql)
        .bind(city)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_designation(
    pool: &SqlitePool,
    designation: &str,
) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE designation = ? ORDER BY id");
    let rows = sqlx::query_as::<_, Employee>(&sql)
        .bind(designation)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Inclusive on both bounds
pub async fn find_by_salary_between(
    pool: &SqlitePool,
    min: f64,
    max: f64,
) -> RepoResult<Vec<Employee>> {
    ensure_finite("min", min)?;
    ensure_finite("max", max)?;
    let sql = format!("{EMPLOYEE_SELECT} WHERE salary BETWEEN ? AND ? ORDER BY id");
    let rows = sqlx::query_as::<_, Employee>(&sql)
        .bind(min)
        .bind(max)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_salary_greater_than(
    pool: &SqlitePool,
    amount: f64,
) -> RepoResult<Vec<Employee>> {
    ensure_finite("salary", amount)?;
    let sql = format!("{EMPLOYEE_SELECT} WHERE salary > ? ORDER BY id");
    let rows = sqlx::query_as::<_, Employee>(&sql)
        .bind(amount)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Same predicate as [`find_by_salary_greater_than`], kept under the name the API exposes
pub async fn find_employees_with_high_salary(
    pool: &SqlitePool,
    threshold: f64,
) -> RepoResult<Vec<Employee>> {
    find_by_salary_greater_than(pool, threshold).await
}

/// Case-insensitive (Unicode) substring match on first name; the keyword is matched literally
pub async fn find_by_first_name_containing_ignore_case(
    pool: &SqlitePool,
    keyword: &str,
) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE first_name REGEXP ? ORDER BY id");
    let rows = sqlx::query_as::<_, Employee>(&sql)
        .bind(format!("(?i){}", regex::escape(keyword)))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Case-insensitive (Unicode) prefix match on first name
pub async fn find_by_name_starts_with(
    pool: &SqlitePool,
    prefix: &str,
) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE first_name REGEXP ? ORDER BY id");
    let rows = sqlx::query_as::<_, Employee>(&sql)
        .bind(format!("(?i)^{}", regex::escape(prefix)))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_email_ending_with(
    pool: &SqlitePool,
    domain: &str,
) -> RepoResult<Vec<Employee>> {
    let sql = format!(
        "{EMPLOYEE_SELECT} WHERE length(email) >= length(?1) AND substr(email, -length(?1)) = ?1 ORDER BY id"
    );
    let rows = sqlx::query_as::<_, Employee>(&sql)
        .bind(domain)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_department_and_city(
    pool: &SqlitePool,
    department: &str,
    city: &str,
) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE department = ? AND city = ? ORDER BY id");
    let rows = sqlx::query_as::<_, Employee>(&sql)
        .bind(department)
        .bind(city)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_city_and_designation(
    pool: &SqlitePool,
    city: &str,
    designation: &str,
) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE city = ? AND designation = ? ORDER BY id");
    let rows = sqlx::query_as::<_, Employee>(&sql)
        .bind(city)
        .bind(designation)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// salary > threshold AND department = dept
pub async fn find_high_earners_in_department(
    pool: &SqlitePool,
    threshold: f64,
    department: &str,
) -> RepoResult<Vec<Employee>> {
    ensure_finite("salary", threshold)?;
    let sql = format!("{EMPLOYEE_SELECT} WHERE salary > ? AND department = ? ORDER BY id");
    let rows = sqlx::query_as::<_, Employee>(&sql)
        .bind(threshold)
        .bind(department)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Highest salary first, ties by id
pub async fn find_all_order_by_salary_desc(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} ORDER BY salary DESC, id ASC");
    let rows = sqlx::query_as::<_, Employee>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_top_highest_paid(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} ORDER BY salary DESC, id ASC LIMIT ?");
    let rows = sqlx::query_as::<_, Employee>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

// ── Aggregates ──────────────────────────────────────────────────────

pub async fn average_salary_by_department(pool: &SqlitePool) -> RepoResult<Vec<DepartmentSalary>> {
    let rows = sqlx::query_as::<_, (String, f64)>(
        "SELECT department, AVG(salary) FROM employees GROUP BY department ORDER BY department",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(DepartmentSalary::from).collect())
}

pub async fn count_by_city(pool: &SqlitePool) -> RepoResult<Vec<CityCount>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT city, COUNT(*) FROM employees GROUP BY city ORDER BY city",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(CityCount::from).collect())
}

fn ensure_finite(name: &str, value: f64) -> RepoResult<()> {
    if !value.is_finite() {
        return Err(RepoError::Validation(format!("{name} must be a finite number")));
    }
    Ok(())
}
