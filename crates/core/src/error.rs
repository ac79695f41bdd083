//! Error taxonomy returned by the rules layer.

use validator::ValidationErrors;

use crate::password::PolicyError;

/// Failure raised by a store implementation.
///
/// Implementations must translate backend-specific unique-constraint failures
/// into [`StoreError::UniqueViolation`] so the rules can report them as
/// duplicates instead of infrastructure faults. An update that finds no
/// active row to write is [`StoreError::NotFound`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("No active row to update: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Outcome of a rejected employee or report operation.
///
/// Everything except [`ErrorKind::Hashing`] and [`ErrorKind::Storage`] is a
/// user-facing validation result the presentation layer renders as a message.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Password must contain only half-width alphanumeric characters")]
    HalfWidthViolation,

    #[error("Password must be between 8 and 16 characters long")]
    LengthViolation,

    #[error("Employee code is already in use")]
    DuplicateCode,

    #[error("A report already exists for this date")]
    DuplicateReport,

    #[error("The record has already been deleted")]
    AlreadyDeleted,

    #[error("You cannot delete your own account")]
    SelfDeletion,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ErrorKind {
    /// Form field the message belongs to, or `None` for page-level messages.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ErrorKind::HalfWidthViolation | ErrorKind::LengthViolation => Some("password"),
            ErrorKind::DuplicateCode => Some("code"),
            ErrorKind::DuplicateReport => Some("report_date"),
            ErrorKind::AlreadyDeleted
            | ErrorKind::SelfDeletion
            | ErrorKind::Validation(_)
            | ErrorKind::Hashing(_)
            | ErrorKind::Storage(_) => None,
        }
    }
}

impl From<PolicyError> for ErrorKind {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::HalfWidthViolation => ErrorKind::HalfWidthViolation,
            PolicyError::LengthViolation => ErrorKind::LengthViolation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_errors_attach_to_password_field() {
        assert_eq!(ErrorKind::HalfWidthViolation.field(), Some("password"));
        assert_eq!(ErrorKind::LengthViolation.field(), Some("password"));
    }

    #[test]
    fn test_duplicates_attach_to_key_fields() {
        assert_eq!(ErrorKind::DuplicateCode.field(), Some("code"));
        assert_eq!(ErrorKind::DuplicateReport.field(), Some("report_date"));
    }

    #[test]
    fn test_page_level_errors_have_no_field() {
        assert_eq!(ErrorKind::SelfDeletion.field(), None);
        assert_eq!(ErrorKind::AlreadyDeleted.field(), None);
    }

    #[test]
    fn test_policy_error_conversion() {
        assert!(matches!(
            ErrorKind::from(PolicyError::HalfWidthViolation),
            ErrorKind::HalfWidthViolation
        ));
        assert!(matches!(
            ErrorKind::from(PolicyError::LengthViolation),
            ErrorKind::LengthViolation
        ));
    }
}
