#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use nippo_core::memory::{MemoryEmployeeStore, MemoryReportStore};
use nippo_core::models::{Employee, NewEmployee, NewReport};
use nippo_core::password::HashedPassword;
use nippo_core::roles::Role;
use nippo_core::store::EmployeeStore;
use nippo_core::{EmployeeRules, ReportRules};

pub const VALID_PASSWORD: &str = "Passw0rd";

/// Rules wired to fresh in-memory stores. The stores are kept so tests can
/// inspect rows the rules no longer return.
pub struct Fixture {
    pub employees: EmployeeRules,
    pub reports: ReportRules,
    pub employee_store: Arc<MemoryEmployeeStore>,
    pub report_store: Arc<MemoryReportStore>,
}

pub fn fixture() -> Fixture {
    let employee_store = Arc::new(MemoryEmployeeStore::new());
    let report_store = Arc::new(MemoryReportStore::new());
    let reports = ReportRules::new(report_store.clone(), employee_store.clone());
    let employees = EmployeeRules::new(employee_store.clone(), reports.clone());
    Fixture {
        employees,
        reports,
        employee_store,
        report_store,
    }
}

/// Register general employees straight through the store, skipping the
/// password hash, so report tests have owners to file under.
pub async fn seed_employees(fx: &Fixture, codes: &[&str]) {
    let now = Utc::now();
    for code in codes {
        fx.employee_store
            .insert(&Employee {
                code: code.to_string(),
                name: format!("Employee {code}"),
                role: Role::General,
                password_hash: HashedPassword::from_stored("$argon2id$stub"),
                deleted: false,
                created_at: now,
                updated_at: now,
            })
            .await
            .expect("seed employee");
    }
}

pub fn new_employee(code: &str, role: Role) -> NewEmployee {
    NewEmployee {
        code: code.to_string(),
        name: format!("Employee {code}"),
        role,
        password: VALID_PASSWORD.to_string(),
    }
}

pub fn new_report(code: &str, date: NaiveDate) -> NewReport {
    NewReport {
        report_date: date,
        title: format!("Report for {date}"),
        content: "Worked on the quarterly numbers.".to_string(),
        employee_code: code.to_string(),
    }
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).expect("valid date")
}
