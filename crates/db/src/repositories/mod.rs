//! Repository layer.
//!
//! Each repository wraps a `PgPool` and implements one of the
//! `nippo_core::store` contracts. Every read filters `deleted = FALSE`.

pub mod employee_repo;
pub mod report_repo;

pub use employee_repo::EmployeeRepo;
pub use report_repo::ReportRepo;
