//! Error types for workshop domain validation and parsing.

use super::{IssueId, RequestId, TaskId, UserId};
use thiserror::Error;

/// Errors returned while constructing or mutating domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username falls outside the accepted length bounds.
    #[error("username '{0}' must be between 2 and 20 characters")]
    UsernameLengthOutOfRange(String),

    /// The username contains characters outside `[a-z0-9_.-]`.
    #[error("username '{0}' contains unsupported characters")]
    InvalidUsername(String),

    /// The email address does not look like `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The email address exceeds the persisted column width.
    #[error("email address '{0}' exceeds 120 characters")]
    EmailTooLong(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title exceeds the persisted column width.
    #[error("title '{0}' exceeds 100 characters")]
    TitleTooLong(String),

    /// The description is required but empty after trimming.
    #[error("description must not be empty")]
    EmptyDescription,

    /// The task assignee does not hold the worker role.
    #[error("user {user_id} does not hold the worker role")]
    AssigneeNotWorker {
        /// Identifier of the rejected assignee.
        user_id: UserId,
    },

    /// The requested task status change is not a permitted transition.
    #[error("task {task_id} cannot move from '{from}' to '{to}'")]
    InvalidTaskTransition {
        /// Identifier of the task being mutated.
        task_id: TaskId,
        /// Current status label.
        from: String,
        /// Rejected target status label.
        to: String,
    },

    /// The requested issue status change is not a permitted transition.
    #[error("issue {issue_id} cannot move from '{from}' to '{to}'")]
    InvalidIssueTransition {
        /// Identifier of the issue being mutated.
        issue_id: IssueId,
        /// Current status label.
        from: String,
        /// Rejected target status label.
        to: String,
    },

    /// The job request has already been approved or declined.
    #[error("request {request_id} was already decided as '{status}'")]
    RequestAlreadyDecided {
        /// Identifier of the decided request.
        request_id: RequestId,
        /// Status recorded by the earlier decision.
        status: String,
    },
}

/// Error returned while parsing account roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing tool statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown tool status: {0}")]
pub struct ParseToolStatusError(pub String);

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing issue statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issue status: {0}")]
pub struct ParseIssueStatusError(pub String);

/// Error returned while parsing request statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown request status: {0}")]
pub struct ParseRequestStatusError(pub String);
