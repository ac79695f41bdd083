//! Row structs matching the database tables.
//!
//! Each row converts into the corresponding `nippo_core` entity; the core
//! crate stays free of sqlx.

pub mod employee;
pub mod report;

pub use employee::EmployeeRow;
pub use report::ReportRow;
