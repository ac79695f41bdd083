//! In-process implementations of the store contracts.
//!
//! Both stores enforce the same uniqueness backstops as the PostgreSQL
//! schema: the employee code is a primary key covering deleted rows too, and
//! at most one active report exists per employee and date.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::models::report::sort_for_listing;
use crate::models::{Employee, NewReport, Report};
use crate::store::{EmployeeStore, ReportStore};
use crate::types::{DbId, ReportDate, Timestamp};

const EMPLOYEE_CODE_CONSTRAINT: &str = "uq_employees_code";
const REPORT_DATE_CONSTRAINT: &str = "uq_reports_employee_date_active";

/// Employees keyed by code.
#[derive(Debug, Default)]
pub struct MemoryEmployeeStore {
    rows: Mutex<BTreeMap<String, Employee>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a row regardless of its deleted flag.
    pub async fn find_by_code_include_deleted(&self, code: &str) -> Option<Employee> {
        self.rows.lock().await.get(code).cloned()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows.get(code).filter(|e| !e.deleted).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows.values().filter(|e| !e.deleted).cloned().collect())
    }

    async fn insert(&self, employee: &Employee) -> Result<Employee, StoreError> {
        let mut rows = self.rows.lock().await;
        if rows.contains_key(&employee.code) {
            return Err(StoreError::UniqueViolation(EMPLOYEE_CODE_CONSTRAINT.into()));
        }
        rows.insert(employee.code.clone(), employee.clone());
        Ok(employee.clone())
    }

    async fn save(&self, employee: &Employee) -> Result<Employee, StoreError> {
        let mut rows = self.rows.lock().await;
        if rows.get(&employee.code).is_some_and(|e| e.deleted) {
            return Err(StoreError::UniqueViolation(EMPLOYEE_CODE_CONSTRAINT.into()));
        }
        rows.insert(employee.code.clone(), employee.clone());
        Ok(employee.clone())
    }
}

#[derive(Debug, Default)]
struct ReportRows {
    next_id: DbId,
    rows: BTreeMap<DbId, Report>,
}

impl ReportRows {
    fn active_on(&self, code: &str, date: ReportDate) -> impl Iterator<Item = &Report> + '_ {
        let code = code.to_owned();
        self.rows
            .values()
            .filter(move |r| !r.deleted && r.employee_code == code && r.report_date == date)
    }
}

/// Reports keyed by a generated id, starting at 1.
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    inner: Mutex<ReportRows>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a row regardless of its deleted flag.
    pub async fn find_by_id_include_deleted(&self, id: DbId) -> Option<Report> {
        self.inner.lock().await.rows.get(&id).cloned()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Report>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.rows.get(&id).filter(|r| !r.deleted).cloned())
    }

    async fn find_all_ordered_by_date_desc_code_asc(&self) -> Result<Vec<Report>, StoreError> {
        let inner = self.inner.lock().await;
        let mut reports: Vec<Report> = inner.rows.values().filter(|r| !r.deleted).cloned().collect();
        sort_for_listing(&mut reports);
        Ok(reports)
    }

    async fn find_by_employee_code_and_date(
        &self,
        code: &str,
        date: ReportDate,
    ) -> Result<Vec<Report>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.active_on(code, date).cloned().collect())
    }

    async fn find_by_employee_code_and_date_excluding_id(
        &self,
        code: &str,
        date: ReportDate,
        id: DbId,
    ) -> Result<Vec<Report>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .active_on(code, date)
            .filter(|r| r.id != id)
            .cloned()
            .collect())
    }

    async fn insert(&self, report: &NewReport, at: Timestamp) -> Result<Report, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner
            .active_on(&report.employee_code, report.report_date)
            .next()
            .is_some()
        {
            return Err(StoreError::UniqueViolation(REPORT_DATE_CONSTRAINT.into()));
        }

        inner.next_id += 1;
        let row = Report {
            id: inner.next_id,
            report_date: report.report_date,
            title: report.title.clone(),
            content: report.content.clone(),
            employee_code: report.employee_code.clone(),
            deleted: false,
            created_at: at,
            updated_at: at,
        };
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn save(&self, report: &Report) -> Result<Report, StoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.rows.get(&report.id).is_some_and(|r| !r.deleted) {
            return Err(StoreError::NotFound(format!("report {}", report.id)));
        }
        if !report.deleted
            && inner
                .active_on(&report.employee_code, report.report_date)
                .any(|r| r.id != report.id)
        {
            return Err(StoreError::UniqueViolation(REPORT_DATE_CONSTRAINT.into()));
        }
        inner.rows.insert(report.id, report.clone());
        Ok(report.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::password::HashedPassword;
    use crate::roles::Role;

    fn employee(code: &str) -> Employee {
        let now = Utc::now();
        Employee {
            code: code.to_string(),
            name: "Test".to_string(),
            role: Role::General,
            password_hash: HashedPassword::from_stored("$argon2id$stub"),
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn new_report(code: &str, date: NaiveDate) -> NewReport {
        NewReport {
            report_date: date,
            title: "Title".to_string(),
            content: "Content".to_string(),
            employee_code: code.to_string(),
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_insert_rejects_existing_code_even_when_deleted() {
        let store = MemoryEmployeeStore::new();
        let mut e = employee("E001");
        store.insert(&e).await.unwrap();

        e.deleted = true;
        store.save(&e).await.unwrap();

        assert_eq!(
            store.insert(&employee("E001")).await,
            Err(StoreError::UniqueViolation(EMPLOYEE_CODE_CONSTRAINT.into()))
        );
    }

    #[tokio::test]
    async fn test_save_never_revives_deleted_employee() {
        let store = MemoryEmployeeStore::new();
        let mut e = employee("E001");
        e.deleted = true;
        store.insert(&e).await.unwrap();

        let revived = employee("E001");
        assert!(store.save(&revived).await.is_err());
        assert!(store.find_by_code("E001").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reads_hide_deleted_employees() {
        let store = MemoryEmployeeStore::new();
        let mut e = employee("E001");
        e.deleted = true;
        store.insert(&e).await.unwrap();
        store.insert(&employee("E002")).await.unwrap();

        assert!(store.find_by_code("E001").await.unwrap().is_none());
        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].code, "E002");
        assert!(store.find_by_code_include_deleted("E001").await.is_some());
    }

    #[tokio::test]
    async fn test_report_ids_are_sequential() {
        let store = MemoryReportStore::new();
        let a = store.insert(&new_report("E001", date(1)), Utc::now()).await.unwrap();
        let b = store.insert(&new_report("E001", date(2)), Utc::now()).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn test_report_insert_enforces_active_uniqueness() {
        let store = MemoryReportStore::new();
        let mut first = store.insert(&new_report("E001", date(1)), Utc::now()).await.unwrap();

        assert!(matches!(
            store.insert(&new_report("E001", date(1)), Utc::now()).await,
            Err(StoreError::UniqueViolation(_))
        ));

        first.deleted = true;
        store.save(&first).await.unwrap();
        assert!(store.insert(&new_report("E001", date(1)), Utc::now()).await.is_ok());
    }

    #[tokio::test]
    async fn test_save_rejects_moving_onto_taken_date() {
        let store = MemoryReportStore::new();
        store.insert(&new_report("E001", date(1)), Utc::now()).await.unwrap();
        let mut second = store.insert(&new_report("E001", date(2)), Utc::now()).await.unwrap();

        second.report_date = date(1);
        assert!(matches!(
            store.save(&second).await,
            Err(StoreError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_save_never_revives_deleted_report() {
        let store = MemoryReportStore::new();
        let active = store.insert(&new_report("E001", date(1)), Utc::now()).await.unwrap();

        let mut deleted = active.clone();
        deleted.deleted = true;
        store.save(&deleted).await.unwrap();

        let edited = Report {
            title: "edited".into(),
            ..active
        };
        assert!(matches!(store.save(&edited).await, Err(StoreError::NotFound(_))));
        assert!(store.find_by_id(edited.id).await.unwrap().is_none());

        let row = store.find_by_id_include_deleted(edited.id).await.unwrap();
        assert!(row.deleted);
        assert_eq!(row.title, "Title");

        // Marking it deleted a second time does not touch the row either.
        assert!(matches!(store.save(&deleted).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_save_unknown_report_is_not_found() {
        let store = MemoryReportStore::new();
        let now = Utc::now();
        let ghost = Report {
            id: 42,
            report_date: date(1),
            title: "t".into(),
            content: "c".into(),
            employee_code: "E001".into(),
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(store.save(&ghost).await, Err(StoreError::NotFound(_))));
    }
}
