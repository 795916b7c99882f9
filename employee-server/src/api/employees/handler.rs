//! Employee API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::models::{CityCount, DepartmentSalary, Employee, EmployeePayload};

use crate::api::extract::{ApiPath, ValidatedJson};
use crate::core::ServerState;
use crate::utils::AppResult;

const DELETED: &str = "Employee deleted successfully!";
const ALL_DELETED: &str = "All employees deleted successfully.";

/// Filter and aggregate reads answer 204 with no body when nothing matched
fn list_or_no_content<T: Serialize>(items: Vec<T>) -> Response {
    if items.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(items).into_response()
    }
}

// ── CRUD ────────────────────────────────────────────────────────────

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<EmployeePayload>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let employee = state.employees.create(payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// List all employees; an empty table is `200 []`
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    Ok(Json(state.employees.get_all().await?))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Employee>> {
    Ok(Json(state.employees.get_by_id(id).await?))
}

/// Update an employee
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<EmployeePayload>,
) -> AppResult<Json<Employee>> {
    Ok(Json(state.employees.update(id, payload).await?))
}

/// Delete an employee; a missing id still answers 200
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<&'static str> {
    state.employees.delete_by_id(id).await?;
    Ok(DELETED)
}

pub async fn delete_all(State(state): State<ServerState>) -> AppResult<&'static str> {
    state.employees.delete_all().await?;
    Ok(ALL_DELETED)
}

// ── Filters ─────────────────────────────────────────────────────────

pub async fn by_city(
    State(state): State<ServerState>,
    ApiPath(city): ApiPath<String>,
) -> AppResult<Response> {
    Ok(list_or_no_content(state.employees.find_by_city(&city).await?))
}

pub async fn by_designation(
    State(state): State<ServerState>,
    ApiPath(designation): ApiPath<String>,
) -> AppResult<Response> {
    Ok(list_or_no_content(
        state.employees.find_by_designation(&designation).await?,
    ))
}

pub async fn by_department(
    State(state): State<ServerState>,
    ApiPath(department): ApiPath<String>,
) -> AppResult<Response> {
    Ok(list_or_no_content(
        state.employees.find_by_department(&department).await?,
    ))
}

pub async fn by_city_and_designation(
    State(state): State<ServerState>,
    ApiPath((city, designation)): ApiPath<(String, String)>,
) -> AppResult<Response> {
    Ok(list_or_no_content(
        state
            .employees
            .find_by_city_and_designation(&city, &designation)
            .await?,
    ))
}

pub async fn by_department_and_city(
    State(state): State<ServerState>,
    ApiPath((department, city)): ApiPath<(String, String)>,
) -> AppResult<Response> {
    Ok(list_or_no_content(
        state
            .employees
            .find_by_department_and_city(&department, &city)
            .await?,
    ))
}

/// Inclusive on both bounds
pub async fn salary_between(
    State(state): State<ServerState>,
    ApiPath((min, max)): ApiPath<(f64, f64)>,
) -> AppResult<Response> {
    Ok(list_or_no_content(
        state.employees.find_by_salary_between(min, max).await?,
    ))
}

/// Strictly greater than `amount`
pub async fn salary_above(
    State(state): State<ServerState>,
    ApiPath(amount): ApiPath<f64>,
) -> AppResult<Response> {
    Ok(list_or_no_content(
        state.employees.find_with_salary_above(amount).await?,
    ))
}

pub async fn salary_desc(State(state): State<ServerState>) -> AppResult<Response> {
    Ok(list_or_no_content(state.employees.order_by_salary_desc().await?))
}

pub async fn top_paid(State(state): State<ServerState>) -> AppResult<Response> {
    Ok(list_or_no_content(state.employees.top_paid().await?))
}

/// Case-insensitive substring of the first name
pub async fn name_search(
    State(state): State<ServerState>,
    ApiPath(keyword): ApiPath<String>,
) -> AppResult<Response> {
    Ok(list_or_no_content(
        state.employees.search_by_first_name(&keyword).await?,
    ))
}

/// Case-insensitive prefix of the first name
pub async fn name_prefix(
    State(state): State<ServerState>,
    ApiPath(prefix): ApiPath<String>,
) -> AppResult<Response> {
    Ok(list_or_no_content(
        state.employees.find_by_name_prefix(&prefix).await?,
    ))
}

pub async fn email_domain(
    State(state): State<ServerState>,
    ApiPath(suffix): ApiPath<String>,
) -> AppResult<Response> {
    Ok(list_or_no_content(
        state.employees.find_by_email_domain(&suffix).await?,
    ))
}

pub async fn high_earners(
    State(state): State<ServerState>,
    ApiPath((department, salary)): ApiPath<(String, f64)>,
) -> AppResult<Response> {
    Ok(list_or_no_content(
        state
            .employees
            .find_high_earners_in_department(&department, salary)
            .await?,
    ))
}

// ── Aggregates ──────────────────────────────────────────────────────

/// `[[department, average], ...]` ordered by department
pub async fn average_salary(State(state): State<ServerState>) -> AppResult<Response> {
    let rows: Vec<DepartmentSalary> = state.employees.average_salary_by_department().await?;
    Ok(list_or_no_content(rows))
}

/// `[[city, count], ...]` ordered by city
pub async fn count_by_city(State(state): State<ServerState>) -> AppResult<Response> {
    let rows: Vec<CityCount> = state.employees.count_by_city().await?;
    Ok(list_or_no_content(rows))
}
