//! Employee Service
//!
//! Business-level operations on top of the employee repository. The
//! repository never reports a missing id; "not found" is decided here.

use shared::models::{CityCount, DepartmentSalary, Employee, EmployeePayload};
use sqlx::SqlitePool;

use crate::db::repository::employee as repo;
use crate::utils::{AppError, AppResult};

/// Rows returned by the top-paid query
pub const TOP_PAID_LIMIT: i64 = 3;

#[derive(Clone, Debug)]
pub struct EmployeeService {
    pool: SqlitePool,
}

impl EmployeeService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: EmployeePayload) -> AppResult<Employee> {
        let employee = repo::save(&self.pool, None, &payload).await?;
        tracing::info!(id = employee.id, emp_code = %employee.emp_code, "Employee created");
        Ok(employee)
    }

    pub async fn get_all(&self) -> AppResult<Vec<Employee>> {
        Ok(repo::find_all(&self.pool).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Employee> {
        repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::employee_not_found(id))
    }

    /// Overwrite every field except `id` and `empCode`
    pub async fn update(&self, id: i64, payload: EmployeePayload) -> AppResult<Employee> {
        let existing = self.get_by_id(id).await?;
        let replacement = EmployeePayload {
            emp_code: existing.emp_code,
            ..payload
        };
        let employee = repo::save(&self.pool, Some(id), &replacement)
            .await
            .map_err(|e| match e {
                // row vanished between the read and the write
                crate::db::repository::RepoError::NotFound(_) => AppError::employee_not_found(id),
                other => other.into(),
            })?;
        tracing::info!(id, "Employee updated");
        Ok(employee)
    }

    /// Idempotent: deleting a missing id succeeds
    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let removed = repo::delete_by_id(&self.pool, id).await?;
        tracing::info!(id, removed, "Employee delete requested");
        Ok(())
    }

    pub async fn delete_all(&self) -> AppResult<u64> {
        let removed = repo::delete_all(&self.pool).await?;
        tracing::warn!(removed, "All employees deleted");
        Ok(removed)
    }

    pub async fn count(&self) -> AppResult<i64> {
        Ok(repo::count(&self.pool).await?)
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub async fn find_by_city(&self, city: &str) -> AppResult<Vec<Employee>> {
        Ok(repo::find_by_city(&self.pool, city).await?)
    }

    pub async fn find_by_designation(&self, designation: &str) -> AppResult<Vec<Employee>> {
        Ok(repo::find_by_designation(&self.pool, designation).await?)
    }

    pub async fn find_by_department(&self, department: &str) -> AppResult<Vec<Employee>> {
        Ok(repo::find_by_department(&self.pool, department).await?)
    }

    pub async fn find_by_salary_between(&self, min: f64, max: f64) -> AppResult<Vec<Employee>> {
        Ok(repo::find_by_salary_between(&self.pool, min, max).await?)
    }

    pub async fn search_by_first_name(&self, keyword: &str) -> AppResult<Vec<Employee>> {
        Ok(repo::find_by_first_name_containing_ignore_case(&self.pool, keyword).await?)
    }

    pub async fn find_by_name_prefix(&self, prefix: &str) -> AppResult<Vec<Employee>> {
        Ok(repo::find_by_name_starts_with(&self.pool, prefix).await?)
    }

    pub async fn find_by_email_domain(&self, domain: &str) -> AppResult<Vec<Employee>> {
        Ok(repo::find_by_email_ending_with(&self.pool, domain).await?)
    }

    pub async fn find_with_salary_above(&self, amount: f64) -> AppResult<Vec<Employee>> {
        Ok(repo::find_employees_with_high_salary(&self.pool, amount).await?)
    }

    pub async fn find_high_earners_in_department(
        &self,
        department: &str,
        threshold: f64,
    ) -> AppResult<Vec<Employee>> {
        Ok(repo::find_high_earners_in_department(&self.pool, threshold, department).await?)
    }

    pub async fn find_by_city_and_designation(
        &self,
        city: &str,
        designation: &str,
    ) -> AppResult<Vec<Employee>> {
        Ok(repo::find_by_city_and_designation(&self.pool, city, designation).await?)
    }

    pub async fn find_by_department_and_city(
        &self,
        department: &str,
        city: &str,
    ) -> AppResult<Vec<Employee>> {
        Ok(repo::find_by_department_and_city(&self.pool, department, city).await?)
    }

    pub async fn order_by_salary_desc(&self) -> AppResult<Vec<Employee>> {
        Ok(repo::find_all_order_by_salary_desc(&self.pool).await?)
    }

    pub async fn top_paid(&self) -> AppResult<Vec<Employee>> {
        Ok(repo::find_top_highest_paid(&self.pool, TOP_PAID_LIMIT).await?)
    }

    pub async fn average_salary_by_department(&self) -> AppResult<Vec<DepartmentSalary>> {
        Ok(repo::average_salary_by_department(&self.pool).await?)
    }

    pub async fn count_by_city(&self) -> AppResult<Vec<CityCount>> {
        Ok(repo::count_by_city(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DbService, seed};
    use shared::error::ErrorCode;

    async fn service() -> EmployeeService {
        let db = DbService::in_memory().await.unwrap();
        seed::seed_if_empty(&db.pool).await.unwrap();
        EmployeeService::new(db.pool)
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let svc = service().await;
        let err = svc.get_by_id(404).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
        assert!(err.message.contains("404"));
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_emp_code() {
        let svc = service().await;
        let original = svc.get_by_id(1).await.unwrap();

        let mut payload = EmployeePayload::from(original.clone());
        payload.emp_code = "CHANGED".into();
        payload.first_name = "Kalaiselvi".into();
        payload.salary = 70000.0;
        payload.city = "Madurai".into();

        let updated = svc.update(1, payload).await.unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.emp_code, original.emp_code);
        assert_eq!(updated.first_name, "Kalaiselvi");
        assert_eq!(updated.salary, 70000.0);
        assert_eq!(updated.city, "Madurai");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let svc = service().await;
        let payload = EmployeePayload::from(svc.get_by_id(1).await.unwrap());
        let err = svc.update(999, payload).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let svc = service().await;
        svc.delete_by_id(2).await.unwrap();
        svc.delete_by_id(2).await.unwrap();
        svc.delete_by_id(12345).await.unwrap();
        assert_eq!(svc.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_duplicate_emp_code_is_system_error() {
        let svc = service().await;
        let payload = EmployeePayload::from(svc.get_by_id(1).await.unwrap());
        let err = svc.create(payload).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.contains("EMP101"));
    }

    #[tokio::test]
    async fn test_top_paid() {
        let svc = service().await;
        let salaries: Vec<f64> = svc.top_paid().await.unwrap().iter().map(|e| e.salary).collect();
        assert_eq!(salaries, vec![65000.0, 60000.0, 58000.0]);
    }
}
