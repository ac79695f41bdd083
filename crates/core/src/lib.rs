//! Business rules for the daily report application.
//!
//! The crate owns the two entities (employees and their daily reports), the
//! password policy, the persistence contracts the rules run against, and an
//! in-memory implementation of those contracts.

pub mod employees;
pub mod error;
pub mod memory;
pub mod models;
pub mod password;
pub mod reports;
pub mod roles;
pub mod store;
pub mod types;

pub use employees::EmployeeRules;
pub use error::{ErrorKind, StoreError};
pub use reports::ReportRules;
