//! Persistence contracts consumed by the rules layer.
//!
//! Every read method excludes soft-deleted rows. Implementations that forget
//! the filter on a single query path silently break the rules above them.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Employee, NewReport, Report};
use crate::types::{DbId, ReportDate, Timestamp};

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Find an active employee by code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError>;

    /// List all active employees ordered by code.
    async fn find_all(&self) -> Result<Vec<Employee>, StoreError>;

    /// Insert a new employee row.
    ///
    /// Fails with [`StoreError::UniqueViolation`] when any row with the same
    /// code exists, deleted or not.
    async fn insert(&self, employee: &Employee) -> Result<Employee, StoreError>;

    /// Insert or update by code. A soft-deleted row is never revived; saving
    /// over one fails with [`StoreError::UniqueViolation`].
    async fn save(&self, employee: &Employee) -> Result<Employee, StoreError>;
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Find an active report by id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Report>, StoreError>;

    /// All active reports, `report_date` descending then `employee_code` ascending.
    async fn find_all_ordered_by_date_desc_code_asc(&self) -> Result<Vec<Report>, StoreError>;

    /// Active reports filed by `code` for `date`.
    async fn find_by_employee_code_and_date(
        &self,
        code: &str,
        date: ReportDate,
    ) -> Result<Vec<Report>, StoreError>;

    /// Active reports filed by `code` for `date`, other than report `id`.
    async fn find_by_employee_code_and_date_excluding_id(
        &self,
        code: &str,
        date: ReportDate,
        id: DbId,
    ) -> Result<Vec<Report>, StoreError>;

    /// Insert an active report with `created_at = updated_at = at`, generating its id.
    ///
    /// Fails with [`StoreError::UniqueViolation`] when an active report
    /// already exists for the same employee and date.
    async fn insert(&self, report: &NewReport, at: Timestamp) -> Result<Report, StoreError>;

    /// Update an active report by id. A soft-deleted row is never written
    /// again; saving over one, or over an unknown id, fails with
    /// [`StoreError::NotFound`].
    async fn save(&self, report: &Report) -> Result<Report, StoreError>;
}
