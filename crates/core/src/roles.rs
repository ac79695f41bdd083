//! Employee roles.
//!
//! The text forms must match the `role` CHECK constraint in
//! `20260301000001_create_employees_table.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_GENERAL: &str = "GENERAL";
pub const ROLE_ADMIN: &str = "ADMIN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    General,
    Admin,
}

impl Role {
    /// Persisted text form.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::General => ROLE_GENERAL,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Human-readable label for list and detail pages.
    pub fn label(self) -> &'static str {
        match self {
            Role::General => "General",
            Role::Admin => "Administrator",
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a persisted role string is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_GENERAL => Ok(Role::General),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!("GENERAL".parse::<Role>(), Ok(Role::General));
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "admin".parse::<Role>(),
            Err(UnknownRole("admin".to_string()))
        );
    }

    #[test]
    fn test_as_str_matches_parse() {
        for role in [Role::General, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::General.is_admin());
    }
}
