//! Row model for the `reports` table.

use nippo_core::models::Report;
use nippo_core::types::{DbId, ReportDate, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub id: DbId,
    pub report_date: ReportDate,
    pub title: String,
    pub content: String,
    pub employee_code: String,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ReportRow> for Report {
    fn from(row: ReportRow) -> Self {
        Report {
            id: row.id,
            report_date: row.report_date,
            title: row.title,
            content: row.content,
            employee_code: row.employee_code,
            deleted: row.deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
