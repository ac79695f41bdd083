//! Entity structs and input DTOs.
//!
//! Each submodule contains:
//! - The persisted entity as the stores hand it back
//! - A `Deserialize` + `Validate` create DTO
//! - A `Deserialize` + `Validate` update DTO

pub mod employee;
pub mod report;

pub use employee::{Employee, NewEmployee, UpdateEmployee};
pub use report::{NewReport, Report, UpdateReport};
