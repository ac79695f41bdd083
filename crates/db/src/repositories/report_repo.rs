//! Repository for the `reports` table.

use async_trait::async_trait;
use nippo_core::models::{NewReport, Report};
use nippo_core::store::ReportStore;
use nippo_core::types::{DbId, ReportDate, Timestamp};
use nippo_core::StoreError;
use sqlx::PgPool;

use crate::error::to_store_error;
use crate::models::ReportRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, report_date, title, content, employee_code, deleted, created_at, updated_at";

/// PostgreSQL-backed [`ReportStore`].
#[derive(Debug, Clone)]
pub struct ReportRepo {
    pool: PgPool,
}

impl ReportRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a report by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(&self, id: DbId) -> Result<Option<Report>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        let row = sqlx::query_as::<_, ReportRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(to_store_error)?;
        Ok(row.map(Report::from))
    }
}

#[async_trait]
impl ReportStore for ReportRepo {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Report>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1 AND deleted = FALSE");
        let row = sqlx::query_as::<_, ReportRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(to_store_error)?;
        Ok(row.map(Report::from))
    }

    async fn find_all_ordered_by_date_desc_code_asc(&self) -> Result<Vec<Report>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE deleted = FALSE
             ORDER BY report_date DESC, employee_code ASC"
        );
        let rows = sqlx::query_as::<_, ReportRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(to_store_error)?;
        Ok(rows.into_iter().map(Report::from).collect())
    }

    async fn find_by_employee_code_and_date(
        &self,
        code: &str,
        date: ReportDate,
    ) -> Result<Vec<Report>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE employee_code = $1 AND report_date = $2 AND deleted = FALSE"
        );
        let rows = sqlx::query_as::<_, ReportRow>(&query)
            .bind(code)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(to_store_error)?;
        Ok(rows.into_iter().map(Report::from).collect())
    }

    async fn find_by_employee_code_and_date_excluding_id(
        &self,
        code: &str,
        date: ReportDate,
        id: DbId,
    ) -> Result<Vec<Report>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE employee_code = $1 AND report_date = $2 AND id <> $3 AND deleted = FALSE"
        );
        let rows = sqlx::query_as::<_, ReportRow>(&query)
            .bind(code)
            .bind(date)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(to_store_error)?;
        Ok(rows.into_iter().map(Report::from).collect())
    }

    async fn insert(&self, report: &NewReport, at: Timestamp) -> Result<Report, StoreError> {
        let query = format!(
            "INSERT INTO reports (report_date, title, content, employee_code, deleted, created_at, updated_at)
             VALUES ($1, $2, $3, $4, FALSE, $5, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ReportRow>(&query)
            .bind(report.report_date)
            .bind(&report.title)
            .bind(&report.content)
            .bind(&report.employee_code)
            .bind(at)
            .fetch_one(&self.pool)
            .await
            .map_err(to_store_error)?;
        Ok(row.into())
    }

    /// Update an active row by id. `id`, `employee_code` and `created_at` are
    /// never written, and a soft-deleted row is left as it is.
    async fn save(&self, report: &Report) -> Result<Report, StoreError> {
        let query = format!(
            "UPDATE reports SET
                report_date = $2,
                title = $3,
                content = $4,
                deleted = $5,
                updated_at = $6
             WHERE id = $1 AND deleted = FALSE
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ReportRow>(&query)
            .bind(report.id)
            .bind(report.report_date)
            .bind(&report.title)
            .bind(&report.content)
            .bind(report.deleted)
            .bind(report.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(to_store_error)?;

        row.map(Report::from)
            .ok_or_else(|| StoreError::NotFound(format!("report {}", report.id)))
    }
}
