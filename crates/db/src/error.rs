//! Translation of sqlx failures into store errors.

use nippo_core::StoreError;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Classify a sqlx error for the rules layer.
///
/// Unique violations keep the constraint name so callers can tell which
/// invariant tripped; everything else becomes an opaque backend error.
pub fn to_store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            return StoreError::UniqueViolation(constraint);
        }
    }
    tracing::error!(error = %err, "Database error");
    StoreError::Backend(err.to_string())
}
