//! Employee password policy and Argon2id hashing.
//!
//! A password is acceptable when it consists solely of half-width ASCII
//! letters and digits and is between [`PASSWORD_MIN_LEN`] and
//! [`PASSWORD_MAX_LEN`] characters long. The character check runs first, so a
//! password failing both reports [`PolicyError::HalfWidthViolation`].
//!
//! Hashes use the PHC string format so that algorithm parameters and salt are
//! embedded in the stored value.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("Password contains characters outside [A-Za-z0-9]")]
    HalfWidthViolation,

    #[error("Password length must be between 8 and 16 characters")]
    LengthViolation,
}

/// Check a plaintext password against the policy.
pub fn validate_password(password: &str) -> Result<(), PolicyError> {
    if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PolicyError::HalfWidthViolation);
    }

    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(PolicyError::LengthViolation);
    }

    Ok(())
}

/// A PHC-formatted Argon2id hash.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap a hash previously produced by [`hash_password`] and loaded from storage.
    pub fn from_stored(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Check a plaintext candidate against this hash.
    ///
    /// Parameters and salt come from the PHC string itself. A stored value
    /// that does not parse never verifies.
    pub fn verify(&self, candidate: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            tracing::warn!("Stored password hash is not a valid PHC string");
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(..)")
    }
}

/// Hash a plaintext password for storage under a fresh random salt.
pub fn hash_password(plaintext: &str) -> Result<HashedPassword, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|phc| HashedPassword(phc.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_passwords_pass() {
        assert_eq!(validate_password("abcd1234"), Ok(()));
        assert_eq!(validate_password("ABCDEFGHijkl5678"), Ok(()));
    }

    #[test]
    fn test_length_boundaries() {
        assert_eq!(validate_password("a1b2c3d"), Err(PolicyError::LengthViolation));
        assert_eq!(validate_password("a1b2c3d4"), Ok(()));
        assert_eq!(validate_password("a1b2c3d4e5f6g7h8"), Ok(()));
        assert_eq!(
            validate_password("a1b2c3d4e5f6g7h8i"),
            Err(PolicyError::LengthViolation)
        );
    }

    #[test]
    fn test_empty_password_is_a_length_violation() {
        assert_eq!(validate_password(""), Err(PolicyError::LengthViolation));
    }

    #[test]
    fn test_disallowed_characters_rejected_regardless_of_length() {
        for pw in [
            "pass-word1",
            "パスワード12345678",
            "ab!",
            "abcdefgh ",
            "ａｂｃｄｅｆｇｈ",
            "a_very_long_password_indeed",
        ] {
            assert_eq!(
                validate_password(pw),
                Err(PolicyError::HalfWidthViolation),
                "expected half-width violation for {pw:?}"
            );
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Secret123").expect("hashing should succeed");

        assert!(
            hash.as_str().starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );
        assert_ne!(hash.as_str(), "Secret123");
        assert!(hash.verify("Secret123"));
        assert!(!hash.verify("Secret124"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("Secret123").unwrap();
        let b = hash_password("Secret123").unwrap();
        assert_ne!(a, b, "two hashes of the same password should differ");
        assert!(a.verify("Secret123") && b.verify("Secret123"));
    }

    #[test]
    fn test_verify_uses_parameters_embedded_in_hash() {
        use argon2::{Algorithm, Params, Version};

        let params = Params::new(8 * 1024, 1, 1, None).unwrap();
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(b"Secret123", &salt)
            .unwrap()
            .to_string();

        let stored = HashedPassword::from_stored(phc);
        assert!(stored.verify("Secret123"));
        assert!(!stored.verify("Secret124"));
    }

    #[test]
    fn test_malformed_stored_hash_never_verifies() {
        let stored = HashedPassword::from_stored("not-a-phc-string");
        assert!(!stored.verify("anything"));
    }

    #[test]
    fn test_debug_does_not_leak_hash() {
        let hash = hash_password("Secret123").unwrap();
        assert_eq!(format!("{hash:?}"), "HashedPassword(..)");
    }
}
