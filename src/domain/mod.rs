//! Domain model for workshop tool, task, issue, and job request lifecycles.
//!
//! The domain models account roles, tool availability, task and issue state
//! machines, and job request decisions while keeping all infrastructure
//! concerns outside of the domain boundary. Tool availability is a derived
//! projection of the open work recorded against each tool rather than a
//! freely writable field.

mod actor;
mod credential;
mod error;
mod ids;
mod issue;
mod request;
mod role;
mod task;
mod title;
mod tool;
mod user;

pub use actor::{AccessDenied, Actor};
pub use credential::{CredentialError, PasswordHash};
pub use error::{
    DomainError, ParseIssueStatusError, ParseRequestStatusError, ParseRoleError,
    ParseTaskPriorityError, ParseTaskStatusError, ParseToolStatusError,
};
pub use ids::{EntityKind, EntityRef, IssueId, RequestId, TaskId, ToolId, UserId};
pub use issue::{IssueStatus, PersistedIssueData, ToolIssue};
pub use request::{JobRequest, PersistedRequestData, RequestStatus};
pub use role::Role;
pub use task::{PersistedTaskData, Task, TaskPriority, TaskStatus};
pub use title::Title;
pub use tool::{PersistedToolData, Tool, ToolEdit, ToolStatus};
pub use user::{EmailAddress, PersistedUserData, User, Username};
