//! Service-level error taxonomy shared by the workshop services.

use crate::domain::{
    AccessDenied, CredentialError, DomainError, EmailAddress, EntityRef, IssueId, RequestId,
    TaskId, Username,
};
use crate::ports::WorkshopStoreError;
use thiserror::Error;

/// Errors surfaced by workshop service operations.
///
/// Every failure is terminal for the single operation that raised it; the
/// store's unit of work rolls back whatever the operation had written.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A referenced record does not exist.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// The operation lost against the current state of a record.
    #[error(transparent)]
    Conflict(#[from] ConflictCause),

    /// The actor's role or ownership does not permit the operation.
    #[error(transparent)]
    Forbidden(AccessDenied),

    /// Input failed domain validation.
    #[error(transparent)]
    Validation(DomainError),

    /// The username and password did not match an account.
    ///
    /// Deliberately uninformative: callers cannot tell whether the username
    /// or the password was wrong.
    #[error("invalid username or password")]
    Authentication,

    /// Password hashing infrastructure failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The persistence store failed.
    #[error(transparent)]
    Store(WorkshopStoreError),
}

/// Result type for workshop service operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Causes of [`LifecycleError::Conflict`].
#[derive(Debug, Error)]
pub enum ConflictCause {
    /// The username is already registered.
    #[error("username '{0}' is already taken")]
    UsernameTaken(Username),

    /// The email address is already registered.
    #[error("email address '{0}' is already taken")]
    EmailTaken(EmailAddress),

    /// A record with the same identifier already exists.
    #[error("{0} already exists")]
    DuplicateRecord(EntityRef),

    /// The requested task status change is not a permitted transition.
    #[error("task {task_id} cannot move from '{from}' to '{to}'")]
    TaskTransition {
        /// Identifier of the task being mutated.
        task_id: TaskId,
        /// Current status label.
        from: String,
        /// Rejected target status label.
        to: String,
    },

    /// The requested issue status change is not a permitted transition.
    #[error("issue {issue_id} cannot move from '{from}' to '{to}'")]
    IssueTransition {
        /// Identifier of the issue being mutated.
        issue_id: IssueId,
        /// Current status label.
        from: String,
        /// Rejected target status label.
        to: String,
    },

    /// The job request was approved or declined earlier.
    #[error("request {request_id} was already decided as '{status}'")]
    RequestAlreadyDecided {
        /// Identifier of the decided request.
        request_id: RequestId,
        /// Status recorded by the earlier decision.
        status: String,
    },
}

impl LifecycleError {
    /// Wraps an access-control rejection, recording it as a warning.
    pub(crate) fn forbidden(denial: AccessDenied) -> Self {
        tracing::warn!(%denial, "access denied");
        Self::Forbidden(denial)
    }
}

impl From<DomainError> for LifecycleError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidTaskTransition { task_id, from, to } => {
                Self::Conflict(ConflictCause::TaskTransition { task_id, from, to })
            }
            DomainError::InvalidIssueTransition { issue_id, from, to } => {
                Self::Conflict(ConflictCause::IssueTransition { issue_id, from, to })
            }
            DomainError::RequestAlreadyDecided { request_id, status } => {
                Self::Conflict(ConflictCause::RequestAlreadyDecided { request_id, status })
            }
            other => Self::Validation(other),
        }
    }
}

impl From<WorkshopStoreError> for LifecycleError {
    fn from(err: WorkshopStoreError) -> Self {
        match err {
            WorkshopStoreError::UsernameTaken(username) => {
                Self::Conflict(ConflictCause::UsernameTaken(username))
            }
            WorkshopStoreError::EmailTaken(email) => {
                Self::Conflict(ConflictCause::EmailTaken(email))
            }
            WorkshopStoreError::Duplicate(entity) => {
                Self::Conflict(ConflictCause::DuplicateRecord(entity))
            }
            WorkshopStoreError::Missing(entity) => Self::NotFound(entity),
            other => Self::Store(other),
        }
    }
}
