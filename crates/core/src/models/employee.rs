//! Employee entity model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::password::HashedPassword;
use crate::roles::Role;
use crate::types::Timestamp;

/// A persisted employee account.
///
/// The password hash is skipped on serialization; never expose it to views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub code: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: HashedPassword,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Employee {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// DTO for registering a new employee. The password is plaintext and
/// mandatory.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewEmployee {
    #[validate(length(min = 1, max = 10))]
    pub code: String,
    #[validate(length(min = 1, max = 20))]
    pub name: String,
    pub role: Role,
    pub password: String,
}

/// DTO for editing an existing employee, addressed by its code.
///
/// An empty `password` keeps the stored hash.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, max = 10))]
    pub code: String,
    #[validate(length(min = 1, max = 20))]
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub password: String,
}

impl UpdateEmployee {
    pub fn changes_password(&self) -> bool {
        !self.password.is_empty()
    }
}
