//! Row model for the `employees` table.

use nippo_core::models::Employee;
use nippo_core::password::HashedPassword;
use nippo_core::roles::{Role, UnknownRole};
use nippo_core::types::Timestamp;
use sqlx::FromRow;

/// Full employee row, password hash included.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub code: String,
    pub name: String,
    pub role: String,
    pub password_hash: String,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = UnknownRole;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Employee {
            code: row.code,
            name: row.name,
            role: row.role.parse::<Role>()?,
            password_hash: HashedPassword::from_stored(row.password_hash),
            deleted: row.deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
