//! Registered account aggregate and its validated value objects.

use super::{DomainError, PasswordHash, Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length for a username.
const MIN_USERNAME_LENGTH: usize = 2;

/// Maximum length for a username, matching the `VARCHAR(20)` column.
const MAX_USERNAME_LENGTH: usize = 20;

/// Maximum length for an email address, matching the `VARCHAR(120)` column.
const MAX_EMAIL_LENGTH: usize = 120;

/// Validated, lowercase account username.
///
/// Usernames are trimmed and lowercased. Only characters in `[a-z0-9_.-]`
/// are accepted, and the length must be between 2 and 20 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyUsername`] when the value is empty after
    /// trimming, [`DomainError::UsernameLengthOutOfRange`] when shorter than
    /// 2 or longer than 20 characters, or [`DomainError::InvalidUsername`]
    /// when it contains characters outside `[a-z0-9_.-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(DomainError::EmptyUsername);
        }

        let length = normalized.chars().count();
        if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&length) {
            return Err(DomainError::UsernameLengthOutOfRange(raw));
        }

        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-'));

        if !is_valid {
            return Err(DomainError::InvalidUsername(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated, lowercase email address.
///
/// Validation is a shape check only: one `@` separating a non-empty local
/// part from a domain containing at least one dot, no whitespace. Delivery
/// verification is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEmail`] when the value does not look
    /// like `local@domain.tld`, or [`DomainError::EmailTooLong`] when it
    /// exceeds 120 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.chars().count() > MAX_EMAIL_LENGTH {
            return Err(DomainError::EmailTooLong(raw));
        }

        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let has_more_parts = parts.next().is_some();
        let is_valid = !local.is_empty()
            && !has_more_parts
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(DomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered account aggregate root.
///
/// The aggregate is deliberately not serialisable so the stored credential
/// cannot leak through a serialisation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    credential: PasswordHash,
    role: Role,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted account identifier.
    pub id: UserId,
    /// Persisted username.
    pub username: Username,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted credential hash.
    pub credential: PasswordHash,
    /// Persisted role.
    pub role: Role,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new account with the given role.
    #[must_use]
    pub fn new(
        username: Username,
        email: EmailAddress,
        credential: PasswordHash,
        role: Role,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            credential,
            role,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an account from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            email: data.email,
            credential: data.credential,
            role: data.role,
            created_at: data.created_at,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the stored credential hash.
    #[must_use]
    pub const fn credential(&self) -> &PasswordHash {
        &self.credential
    }

    /// Returns the account role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the account holds the worker role.
    #[must_use]
    pub const fn is_worker(&self) -> bool {
        matches!(self.role, Role::Worker)
    }

    /// Returns whether the account holds the owner role.
    #[must_use]
    pub const fn is_owner(&self) -> bool {
        matches!(self.role, Role::Owner)
    }
}
