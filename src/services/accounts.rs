//! Account registration and authentication service.

use super::error::{LifecycleError, LifecycleResult};
use crate::domain::{DomainError, EmailAddress, PasswordHash, Role, User, Username};
use crate::ports::WorkshopStore;
use mockable::Clock;
use std::fmt;
use std::sync::Arc;

/// Request payload for registering a workshop account.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
    username: String,
    email: String,
    password: String,
    role: Role,
}

impl NewAccount {
    /// Creates a registration payload.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Account registration and authentication orchestration service.
#[derive(Clone)]
pub struct AccountService<S, C>
where
    S: WorkshopStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> AccountService<S, C>
where
    S: WorkshopStore,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Registers a new account with a freshly hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Validation`] when a field fails shape
    /// validation, [`LifecycleError::Conflict`] when the username or email
    /// address is already registered, and [`LifecycleError::Credential`]
    /// when password hashing fails.
    pub async fn register(&self, account: NewAccount) -> LifecycleResult<User> {
        let NewAccount {
            username: raw_username,
            email: raw_email,
            password,
            role,
        } = account;

        let username = Username::new(raw_username)?;
        let email = EmailAddress::new(raw_email)?;
        if password.trim().is_empty() {
            return Err(DomainError::EmptyPassword.into());
        }
        let credential = PasswordHash::derive(&password)?;

        let user = User::new(username, email, credential, role, &*self.clock);
        self.store.insert_user(&user).await?;
        Ok(user)
    }

    /// Authenticates a username and password pair.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Authentication`] when the pair does not
    /// match an account. The error does not reveal whether the username or
    /// the password was wrong.
    pub async fn authenticate(&self, username: &str, password: &str) -> LifecycleResult<User> {
        let login =
            Username::new(username).map_err(|_err| LifecycleError::Authentication)?;
        let user = self
            .store
            .find_user_by_username(&login)
            .await?
            .ok_or(LifecycleError::Authentication)?;

        if user.credential().verify(password)? {
            return Ok(user);
        }
        Err(LifecycleError::Authentication)
    }
}
