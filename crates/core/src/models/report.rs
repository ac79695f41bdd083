//! Report entity model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, ReportDate, Timestamp};

/// A persisted daily report. Owned by exactly one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: DbId,
    pub report_date: ReportDate,
    pub title: String,
    pub content: String,
    pub employee_code: String,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a new report.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReport {
    pub report_date: ReportDate,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 600))]
    pub content: String,
    #[validate(length(min = 1, max = 10))]
    pub employee_code: String,
}

/// DTO for editing a report.
///
/// `employee_code` identifies the owner for the duplicate-date check; the
/// persisted owner is never reassigned.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReport {
    pub id: DbId,
    pub report_date: ReportDate,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 600))]
    pub content: String,
    #[validate(length(min = 1, max = 10))]
    pub employee_code: String,
}

/// Order reports newest date first, then by employee code.
pub fn sort_for_listing(reports: &mut [Report]) {
    reports.sort_by(|a, b| {
        b.report_date
            .cmp(&a.report_date)
            .then_with(|| a.employee_code.cmp(&b.employee_code))
    });
}
