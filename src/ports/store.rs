//! Persistence port for workshop records.
//!
//! A single store contract covers accounts, tools, tasks, issues, and job
//! requests so that cross-record guarantees (referential checks, cascade
//! deletion, derived tool status) can be promised per call rather than
//! stitched together by callers.
//!
//! # Unit of work
//!
//! Every method is one atomic unit of work: it either applies completely or
//! leaves the store untouched. Mutations that change the set of active
//! tasks or open issues recorded against a tool recompute that tool's
//! stored status via [`ToolStatus::derive`] before the unit of work ends,
//! so a successfully returned call always leaves the stored status
//! consistent with the work it just recorded.
//!
//! [`ToolStatus::derive`]: crate::domain::ToolStatus::derive

use crate::domain::{
    EmailAddress, EntityRef, IssueId, JobRequest, RequestId, RequestStatus, Role, Task, TaskId,
    Tool, ToolId, ToolIssue, ToolStatus, User, UserId, Username,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workshop store operations.
pub type WorkshopStoreResult<T> = Result<T, WorkshopStoreError>;

/// Outcome of deleting a tool together with its dependent records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCascade {
    /// The deleted tool.
    pub tool: Tool,
    /// Number of tasks removed by the cascade.
    pub tasks_removed: usize,
    /// Number of issues removed by the cascade.
    pub issues_removed: usize,
    /// Number of job requests removed by the cascade.
    pub requests_removed: usize,
}

/// Workshop persistence contract.
#[async_trait]
pub trait WorkshopStore: Send + Sync {
    /// Stores a new account.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopStoreError::Duplicate`] when the account ID already
    /// exists, [`WorkshopStoreError::UsernameTaken`] when the username is
    /// already registered, or [`WorkshopStoreError::EmailTaken`] when the
    /// email address is already registered.
    async fn insert_user(&self, user: &User) -> WorkshopStoreResult<()>;

    /// Finds an account by identifier.
    ///
    /// Returns `None` when the account does not exist.
    async fn find_user(&self, id: UserId) -> WorkshopStoreResult<Option<User>>;

    /// Finds an account by unique username.
    ///
    /// Returns `None` when no account has the given username.
    async fn find_user_by_username(
        &self,
        username: &Username,
    ) -> WorkshopStoreResult<Option<User>>;

    /// Returns all accounts holding the given role, ordered by username.
    async fn list_users_by_role(&self, role: Role) -> WorkshopStoreResult<Vec<User>>;

    /// Stores a new tool.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopStoreError::Duplicate`] when the tool ID already
    /// exists.
    async fn insert_tool(&self, tool: &Tool) -> WorkshopStoreResult<()>;

    /// Persists an owner's edit of an existing tool.
    ///
    /// This is the manual override path; no status derivation happens here.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopStoreError::Missing`] when the tool does not exist.
    async fn update_tool(&self, tool: &Tool) -> WorkshopStoreResult<()>;

    /// Finds a tool by identifier.
    ///
    /// Returns `None` when the tool does not exist.
    async fn find_tool(&self, id: ToolId) -> WorkshopStoreResult<Option<Tool>>;

    /// Returns all tools, ordered by name.
    async fn list_tools(&self) -> WorkshopStoreResult<Vec<Tool>>;

    /// Returns all tools with the given status, ordered by name.
    async fn list_tools_by_status(&self, status: ToolStatus) -> WorkshopStoreResult<Vec<Tool>>;

    /// Deletes a tool and every task, issue, and job request that references
    /// it, reporting what the cascade removed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopStoreError::Missing`] when the tool does not exist.
    async fn delete_tool(&self, id: ToolId) -> WorkshopStoreResult<ToolCascade>;

    /// Stores a new task and refreshes the referenced tool's status.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopStoreError::Duplicate`] when the task ID already
    /// exists, or [`WorkshopStoreError::Missing`] when the assigned worker
    /// or referenced tool does not exist.
    async fn insert_task(&self, task: &Task) -> WorkshopStoreResult<()>;

    /// Persists a task lifecycle change and refreshes the referenced tool's
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopStoreError::Missing`] when the task does not exist.
    async fn update_task(&self, task: &Task) -> WorkshopStoreResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> WorkshopStoreResult<Option<Task>>;

    /// Returns all tasks, most recently assigned first.
    async fn list_tasks(&self) -> WorkshopStoreResult<Vec<Task>>;

    /// Returns the tasks assigned to a worker, most recently assigned first.
    async fn list_tasks_for_worker(&self, worker_id: UserId) -> WorkshopStoreResult<Vec<Task>>;

    /// Stores a new issue and refreshes the affected tool's status.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopStoreError::Duplicate`] when the issue ID already
    /// exists, or [`WorkshopStoreError::Missing`] when the reporter or tool
    /// does not exist.
    async fn insert_issue(&self, issue: &ToolIssue) -> WorkshopStoreResult<()>;

    /// Persists an issue lifecycle change and refreshes the affected tool's
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopStoreError::Missing`] when the issue does not exist.
    async fn update_issue(&self, issue: &ToolIssue) -> WorkshopStoreResult<()>;

    /// Finds an issue by identifier.
    ///
    /// Returns `None` when the issue does not exist.
    async fn find_issue(&self, id: IssueId) -> WorkshopStoreResult<Option<ToolIssue>>;

    /// Returns all issues, most recently reported first.
    async fn list_issues(&self) -> WorkshopStoreResult<Vec<ToolIssue>>;

    /// Stores a new job request.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopStoreError::Duplicate`] when the request ID already
    /// exists, or [`WorkshopStoreError::Missing`] when the requester or
    /// referenced tool does not exist.
    async fn insert_request(&self, request: &JobRequest) -> WorkshopStoreResult<()>;

    /// Persists a request decision that creates no task (decline).
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopStoreError::Missing`] when the request does not
    /// exist.
    async fn update_request(&self, request: &JobRequest) -> WorkshopStoreResult<()>;

    /// Persists an approval: the decided request and the task created from
    /// it, in one unit of work, refreshing the referenced tool's status.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopStoreError::Missing`] when the request, the
    /// assigned worker, or the referenced tool does not exist, or
    /// [`WorkshopStoreError::Duplicate`] when the task ID already exists.
    async fn record_approval(&self, request: &JobRequest, task: &Task) -> WorkshopStoreResult<()>;

    /// Finds a job request by identifier.
    ///
    /// Returns `None` when the request does not exist.
    async fn find_request(&self, id: RequestId) -> WorkshopStoreResult<Option<JobRequest>>;

    /// Returns all requests with the given status, most recently requested
    /// first.
    async fn list_requests_by_status(
        &self,
        status: RequestStatus,
    ) -> WorkshopStoreResult<Vec<JobRequest>>;

    /// Returns the requests submitted by a worker, most recently requested
    /// first.
    async fn list_requests_for_worker(
        &self,
        requester_id: UserId,
    ) -> WorkshopStoreResult<Vec<JobRequest>>;
}

/// Errors returned by workshop store implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkshopStoreError {
    /// A record with the same identifier already exists.
    #[error("duplicate record: {0}")]
    Duplicate(EntityRef),

    /// An account with the same username already exists.
    #[error("username already registered: {0}")]
    UsernameTaken(Username),

    /// An account with the same email address already exists.
    #[error("email address already registered: {0}")]
    EmailTaken(EmailAddress),

    /// A referenced record was not found.
    #[error("missing record: {0}")]
    Missing(EntityRef),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkshopStoreError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
