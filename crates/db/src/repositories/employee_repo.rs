//! Repository for the `employees` table.

use async_trait::async_trait;
use nippo_core::models::Employee;
use nippo_core::store::EmployeeStore;
use nippo_core::StoreError;
use sqlx::PgPool;

use crate::error::to_store_error;
use crate::models::EmployeeRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "code, name, role, password_hash, deleted, created_at, updated_at";

fn into_employee(row: EmployeeRow) -> Result<Employee, StoreError> {
    Employee::try_from(row).map_err(|e| StoreError::Backend(e.to_string()))
}

/// PostgreSQL-backed [`EmployeeStore`].
#[derive(Debug, Clone)]
pub struct EmployeeRepo {
    pool: PgPool,
}

impl EmployeeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an employee by code, including soft-deleted rows.
    pub async fn find_by_code_include_deleted(
        &self,
        code: &str,
    ) -> Result<Option<Employee>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE code = $1");
        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(to_store_error)?
            .map(into_employee)
            .transpose()
    }
}

#[async_trait]
impl EmployeeStore for EmployeeRepo {
    async fn find_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE code = $1 AND deleted = FALSE");
        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(to_store_error)?
            .map(into_employee)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE deleted = FALSE ORDER BY code");
        sqlx::query_as::<_, EmployeeRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(to_store_error)?
            .into_iter()
            .map(into_employee)
            .collect()
    }

    async fn insert(&self, employee: &Employee) -> Result<Employee, StoreError> {
        let query = format!(
            "INSERT INTO employees (code, name, role, password_hash, deleted, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(&employee.code)
            .bind(&employee.name)
            .bind(employee.role.as_str())
            .bind(employee.password_hash.as_str())
            .bind(employee.deleted)
            .bind(employee.created_at)
            .bind(employee.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(to_store_error)?;
        into_employee(row)
    }

    /// Upsert by code. The conflict branch only fires for active rows, so a
    /// deleted employee is never overwritten.
    async fn save(&self, employee: &Employee) -> Result<Employee, StoreError> {
        let query = format!(
            "INSERT INTO employees (code, name, role, password_hash, deleted, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (code) DO UPDATE SET
                name = EXCLUDED.name,
                role = EXCLUDED.role,
                password_hash = EXCLUDED.password_hash,
                deleted = EXCLUDED.deleted,
                updated_at = EXCLUDED.updated_at
             WHERE employees.deleted = FALSE
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(&employee.code)
            .bind(&employee.name)
            .bind(employee.role.as_str())
            .bind(employee.password_hash.as_str())
            .bind(employee.deleted)
            .bind(employee.created_at)
            .bind(employee.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(to_store_error)?;

        match row {
            Some(row) => into_employee(row),
            None => Err(StoreError::UniqueViolation("uq_employees_code".into())),
        }
    }
}
