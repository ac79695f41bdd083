//! Employee account rules: code uniqueness, password policy, the
//! self-deletion guard, and cascading soft-delete of owned reports.

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::error::{ErrorKind, StoreError};
use crate::models::{Employee, NewEmployee, UpdateEmployee};
use crate::password::{self, HashedPassword};
use crate::reports::ReportRules;
use crate::store::EmployeeStore;

/// Run the policy on a plaintext password and hash it.
fn checked_hash(plaintext: &str) -> Result<HashedPassword, ErrorKind> {
    password::validate_password(plaintext)?;
    password::hash_password(plaintext).map_err(|e| ErrorKind::Hashing(e.to_string()))
}

fn duplicate_or_storage(err: StoreError) -> ErrorKind {
    match err {
        StoreError::UniqueViolation(_) => ErrorKind::DuplicateCode,
        other => ErrorKind::Storage(other),
    }
}

#[derive(Clone)]
pub struct EmployeeRules {
    store: Arc<dyn EmployeeStore>,
    reports: ReportRules,
}

impl EmployeeRules {
    pub fn new(store: Arc<dyn EmployeeStore>, reports: ReportRules) -> Self {
        Self { store, reports }
    }

    /// Register a new employee.
    ///
    /// The password policy runs before the duplicate-code check, so an
    /// invalid password is reported even when the code is taken.
    pub async fn create(&self, input: &NewEmployee) -> Result<Employee, ErrorKind> {
        input.validate()?;
        let password_hash = checked_hash(&input.password)?;

        if self.store.find_by_code(&input.code).await?.is_some() {
            tracing::warn!(code = %input.code, "Rejected duplicate employee code");
            return Err(ErrorKind::DuplicateCode);
        }

        let now = Utc::now();
        let employee = Employee {
            code: input.code.clone(),
            name: input.name.clone(),
            role: input.role,
            password_hash,
            deleted: false,
            created_at: now,
            updated_at: now,
        };

        let saved = self
            .store
            .insert(&employee)
            .await
            .map_err(duplicate_or_storage)?;

        tracing::info!(code = %saved.code, role = %saved.role, "Employee created");
        Ok(saved)
    }

    /// Edit an active employee. An empty password keeps the stored hash.
    pub async fn update(&self, input: &UpdateEmployee) -> Result<Employee, ErrorKind> {
        input.validate()?;

        let Some(current) = self.store.find_by_code(&input.code).await? else {
            return Err(ErrorKind::AlreadyDeleted);
        };

        let password_hash = if input.changes_password() {
            checked_hash(&input.password)?
        } else {
            current.password_hash
        };

        let updated = Employee {
            code: current.code,
            name: input.name.clone(),
            role: input.role,
            password_hash,
            deleted: false,
            created_at: current.created_at,
            updated_at: Utc::now(),
        };

        let saved = self.store.save(&updated).await.map_err(|e| match e {
            // The row was deleted between the read and the write.
            StoreError::UniqueViolation(_) => ErrorKind::AlreadyDeleted,
            other => ErrorKind::Storage(other),
        })?;

        tracing::info!(
            code = %saved.code,
            password_changed = input.changes_password(),
            "Employee updated"
        );
        Ok(saved)
    }

    /// Soft-delete `code` on behalf of `acting_code`.
    ///
    /// Every active report the employee owns is soft-deleted first; the
    /// employee row is only marked once the cascade has completed. Deleting
    /// an employee that is already gone succeeds without changes.
    pub async fn delete(&self, code: &str, acting_code: &str) -> Result<(), ErrorKind> {
        if code == acting_code {
            tracing::warn!(code, "Rejected self-deletion");
            return Err(ErrorKind::SelfDeletion);
        }

        let Some(current) = self.store.find_by_code(code).await? else {
            tracing::debug!(code, "Employee already deleted, nothing to do");
            return Ok(());
        };

        let reports = self.reports.find_by_employee(code).await?;
        for report in &reports {
            self.reports.soft_delete(report.id).await?;
        }

        let deleted = Employee {
            deleted: true,
            updated_at: Utc::now(),
            ..current
        };
        match self.store.save(&deleted).await {
            Ok(_) => {}
            // Lost a race with a concurrent delete of the same employee.
            Err(StoreError::UniqueViolation(_)) => {
                tracing::debug!(code, "Employee deleted concurrently");
                return Ok(());
            }
            Err(other) => return Err(ErrorKind::Storage(other)),
        }

        tracing::info!(
            code,
            acting_code,
            reports_deleted = reports.len(),
            "Employee soft-deleted"
        );
        Ok(())
    }

    /// All active employees.
    pub async fn find_all(&self) -> Result<Vec<Employee>, ErrorKind> {
        Ok(self.store.find_all().await?)
    }

    /// Find an active employee. Absent or deleted employees yield `None`.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Employee>, ErrorKind> {
        Ok(self.store.find_by_code(code).await?)
    }
}
