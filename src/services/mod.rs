//! Application services orchestrating workshop operations.

mod accounts;
mod error;
mod lifecycle;
mod overview;

pub use accounts::{AccountService, NewAccount};
pub use error::{ConflictCause, LifecycleError, LifecycleResult};
pub use lifecycle::{
    IssueReport, JobRequestSubmission, LifecycleService, NewTool, ProcessedRequest,
    RequestDecision, TaskAssignment, ToolUpdate,
};
pub use overview::{
    OverviewService, OwnerOverview, TaskStatusCounts, ToolStatusCounts, WorkerOverview,
};
