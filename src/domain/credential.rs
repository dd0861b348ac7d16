//! Password credential hashing and verification.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString};
use std::fmt;
use thiserror::Error;

/// Errors raised by credential hashing infrastructure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The Argon2 hasher failed to derive a hash.
    #[error("failed to derive password hash: {0}")]
    HashingFailed(String),

    /// The stored credential is not a parseable PHC string.
    #[error("stored credential is not a valid PHC string: {0}")]
    InvalidStoredHash(String),

    /// Verification failed for a reason other than a wrong password.
    #[error("failed to verify password: {0}")]
    VerificationFailed(String),
}

/// Argon2id password hash in PHC string format.
///
/// The plaintext password never leaves [`PasswordHash::derive`]; only the
/// salted hash is retained. The type deliberately implements neither
/// `Serialize` nor `Deserialize`, and its `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Derives a hash from a plaintext password.
    ///
    /// Uses Argon2id with the library's recommended defaults and a fresh
    /// random salt, so hashing the same password twice yields different
    /// PHC strings.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::HashingFailed`] when the hasher fails.
    pub fn derive(password: &str) -> Result<Self, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| CredentialError::HashingFailed(err.to_string()))?;

        Ok(Self(hash.to_string()))
    }

    /// Wraps a PHC string loaded from persistence.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidStoredHash`] when the value does not
    /// parse as a PHC string.
    pub fn from_phc_string(value: impl Into<String>) -> Result<Self, CredentialError> {
        let raw = value.into();
        PhcHash::new(&raw).map_err(|err| CredentialError::InvalidStoredHash(err.to_string()))?;
        Ok(Self(raw))
    }

    /// Checks a candidate password against this hash.
    ///
    /// A wrong password is a successful check with a `false` result; only
    /// infrastructure problems surface as errors.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidStoredHash`] when the stored value
    /// no longer parses, or [`CredentialError::VerificationFailed`] when the
    /// verifier fails for a reason other than a mismatch.
    pub fn verify(&self, candidate: &str) -> Result<bool, CredentialError> {
        let parsed = PhcHash::new(&self.0)
            .map_err(|err| CredentialError::InvalidStoredHash(err.to_string()))?;

        match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialError::VerificationFailed(err.to_string())),
        }
    }

    /// Returns the PHC string for storage.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
