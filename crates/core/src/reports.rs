//! Daily report rules: one active report per employee per calendar day, and
//! the create / update / soft-delete lifecycle.

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::error::{ErrorKind, StoreError};
use crate::models::{Employee, NewReport, Report, UpdateReport};
use crate::store::{EmployeeStore, ReportStore};
use crate::types::DbId;

/// Map a failed report write onto the rule outcome: a unique violation is a
/// taken date, a missing active row means the report was deleted meanwhile.
fn save_error(err: StoreError) -> ErrorKind {
    match err {
        StoreError::UniqueViolation(_) => ErrorKind::DuplicateReport,
        StoreError::NotFound(_) => ErrorKind::AlreadyDeleted,
        other => ErrorKind::Storage(other),
    }
}

#[derive(Clone)]
pub struct ReportRules {
    store: Arc<dyn ReportStore>,
    employees: Arc<dyn EmployeeStore>,
}

impl ReportRules {
    pub fn new(store: Arc<dyn ReportStore>, employees: Arc<dyn EmployeeStore>) -> Self {
        Self { store, employees }
    }

    /// File a new report for an active employee.
    ///
    /// An unknown or soft-deleted owner is [`ErrorKind::AlreadyDeleted`].
    pub async fn create(&self, input: &NewReport) -> Result<Report, ErrorKind> {
        input.validate()?;

        if self
            .employees
            .find_by_code(&input.employee_code)
            .await?
            .is_none()
        {
            tracing::warn!(
                employee_code = %input.employee_code,
                "Rejected report for an inactive employee"
            );
            return Err(ErrorKind::AlreadyDeleted);
        }

        let existing = self
            .store
            .find_by_employee_code_and_date(&input.employee_code, input.report_date)
            .await?;
        if !existing.is_empty() {
            tracing::warn!(
                employee_code = %input.employee_code,
                report_date = %input.report_date,
                "Rejected duplicate report"
            );
            return Err(ErrorKind::DuplicateReport);
        }

        let report = self
            .store
            .insert(input, Utc::now())
            .await
            .map_err(save_error)?;

        tracing::info!(
            report_id = report.id,
            employee_code = %report.employee_code,
            report_date = %report.report_date,
            "Report created"
        );
        Ok(report)
    }

    /// Edit the date, title and content of an active report.
    ///
    /// The duplicate check runs before the existence check, so a deleted
    /// report whose new date collides with another one reports
    /// [`ErrorKind::DuplicateReport`]. A report deleted between the read and
    /// the write reports [`ErrorKind::AlreadyDeleted`].
    pub async fn update(&self, input: &UpdateReport) -> Result<Report, ErrorKind> {
        input.validate()?;

        let others = self
            .store
            .find_by_employee_code_and_date_excluding_id(
                &input.employee_code,
                input.report_date,
                input.id,
            )
            .await?;
        if !others.is_empty() {
            tracing::warn!(
                report_id = input.id,
                employee_code = %input.employee_code,
                report_date = %input.report_date,
                "Rejected report update onto a taken date"
            );
            return Err(ErrorKind::DuplicateReport);
        }

        let Some(current) = self.store.find_by_id(input.id).await? else {
            return Err(ErrorKind::AlreadyDeleted);
        };

        let updated = Report {
            report_date: input.report_date,
            title: input.title.clone(),
            content: input.content.clone(),
            updated_at: Utc::now(),
            ..current
        };

        let saved = self
            .store
            .save(&updated)
            .await
            .map_err(save_error)?;

        tracing::info!(report_id = saved.id, "Report updated");
        Ok(saved)
    }

    /// Mark a report deleted. Absent or already-deleted reports are a no-op.
    pub async fn soft_delete(&self, id: DbId) -> Result<(), ErrorKind> {
        let Some(current) = self.store.find_by_id(id).await? else {
            tracing::debug!(report_id = id, "Report already deleted, nothing to do");
            return Ok(());
        };

        let deleted = Report {
            deleted: true,
            updated_at: Utc::now(),
            ..current
        };
        match self.store.save(&deleted).await {
            Ok(_) => {
                tracing::info!(report_id = id, "Report soft-deleted");
                Ok(())
            }
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(report_id = id, "Report deleted concurrently, nothing to do");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// All active reports, newest date first, ties broken by employee code.
    pub async fn find_all(&self) -> Result<Vec<Report>, ErrorKind> {
        Ok(self.store.find_all_ordered_by_date_desc_code_asc().await?)
    }

    pub async fn find_by_id(&self, id: DbId) -> Result<Option<Report>, ErrorKind> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Active reports owned by `employee_code`, in [`ReportRules::find_all`] order.
    pub async fn find_by_employee(&self, employee_code: &str) -> Result<Vec<Report>, ErrorKind> {
        let mut reports = self.find_all().await?;
        reports.retain(|r| r.employee_code == employee_code);
        Ok(reports)
    }

    /// Reports the viewer may list: everything for administrators, their
    /// own reports otherwise.
    pub async fn list_visible_to(&self, viewer: &Employee) -> Result<Vec<Report>, ErrorKind> {
        if viewer.is_admin() {
            self.find_all().await
        } else {
            self.find_by_employee(&viewer.code).await
        }
    }
}
