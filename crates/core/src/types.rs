/// Report primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date a report is filed for. No time zone attached.
pub type ReportDate = chrono::NaiveDate;
