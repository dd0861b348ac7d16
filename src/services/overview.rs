//! Read-model service for listings and dashboard summaries.

use super::error::{LifecycleError, LifecycleResult};
use crate::domain::{
    AccessDenied, Actor, JobRequest, RequestStatus, Role, Task, TaskStatus, Tool, ToolIssue,
    ToolStatus, User, UserId,
};
use crate::ports::WorkshopStore;
use std::sync::Arc;

/// Tool counts by availability status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolStatusCounts {
    /// Tools free for new work.
    pub available: usize,
    /// Tools occupied by active tasks.
    pub in_use: usize,
    /// Tools held by open issues.
    pub maintenance: usize,
}

/// Task counts by lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStatusCounts {
    /// Tasks awaiting a start.
    pub pending: usize,
    /// Tasks being worked on.
    pub in_progress: usize,
    /// Finished tasks.
    pub completed: usize,
}

/// Owner dashboard summary across the whole workshop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnerOverview {
    /// Tool counts by availability status.
    pub tools: ToolStatusCounts,
    /// Task counts by lifecycle status.
    pub tasks: TaskStatusCounts,
    /// Issues not yet resolved.
    pub open_issues: usize,
    /// Job requests awaiting a decision.
    pub pending_requests: usize,
}

/// Worker dashboard summary over the worker's own records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerOverview {
    /// Own task counts by lifecycle status.
    pub tasks: TaskStatusCounts,
    /// Own job requests awaiting a decision.
    pub pending_requests: usize,
}

/// Workshop read-model service.
///
/// Tool listings are open to any authenticated session; task, issue, and
/// request listings are scoped by role, with workers restricted to their
/// own records.
#[derive(Clone)]
pub struct OverviewService<S>
where
    S: WorkshopStore,
{
    store: Arc<S>,
}

impl<S> OverviewService<S>
where
    S: WorkshopStore,
{
    /// Creates a new overview service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists every tool, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the listing fails.
    pub async fn list_tools(&self) -> LifecycleResult<Vec<Tool>> {
        Ok(self.store.list_tools().await?)
    }

    /// Lists tools in one availability status, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the listing fails.
    pub async fn tools_by_status(&self, status: ToolStatus) -> LifecycleResult<Vec<Tool>> {
        Ok(self.store.list_tools_by_status(status).await?)
    }

    /// Lists every task, newest assignment first.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not an owner.
    pub async fn list_tasks(&self, actor: Actor) -> LifecycleResult<Vec<Task>> {
        actor.ensure_owner("list_tasks").map_err(LifecycleError::forbidden)?;
        Ok(self.store.list_tasks().await?)
    }

    /// Lists one worker's tasks, newest assignment first.
    ///
    /// Owners may read any worker's tasks; workers only their own.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when a worker asks for another
    /// worker's records.
    pub async fn tasks_for_worker(
        &self,
        actor: Actor,
        worker_id: UserId,
    ) -> LifecycleResult<Vec<Task>> {
        ensure_can_read_worker_records(actor, worker_id)?;
        Ok(self.store.list_tasks_for_worker(worker_id).await?)
    }

    /// Lists every reported issue, newest report first.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not an owner.
    pub async fn list_issues(&self, actor: Actor) -> LifecycleResult<Vec<ToolIssue>> {
        actor.ensure_owner("list_issues").map_err(LifecycleError::forbidden)?;
        Ok(self.store.list_issues().await?)
    }

    /// Lists job requests in one status, newest submission first.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not an owner.
    pub async fn requests_by_status(
        &self,
        actor: Actor,
        status: RequestStatus,
    ) -> LifecycleResult<Vec<JobRequest>> {
        actor
            .ensure_owner("requests_by_status")
            .map_err(LifecycleError::forbidden)?;
        Ok(self.store.list_requests_by_status(status).await?)
    }

    /// Lists one worker's job requests, newest submission first.
    ///
    /// Owners may read any worker's requests; workers only their own.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when a worker asks for another
    /// worker's records.
    pub async fn requests_for_worker(
        &self,
        actor: Actor,
        worker_id: UserId,
    ) -> LifecycleResult<Vec<JobRequest>> {
        ensure_can_read_worker_records(actor, worker_id)?;
        Ok(self.store.list_requests_for_worker(worker_id).await?)
    }

    /// Lists every worker account, ordered by username.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not an owner.
    pub async fn list_workers(&self, actor: Actor) -> LifecycleResult<Vec<User>> {
        actor.ensure_owner("list_workers").map_err(LifecycleError::forbidden)?;
        Ok(self.store.list_users_by_role(Role::Worker).await?)
    }

    /// Summarizes the workshop for an owner's dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not an owner.
    pub async fn owner_overview(&self, actor: Actor) -> LifecycleResult<OwnerOverview> {
        actor.ensure_owner("owner_overview").map_err(LifecycleError::forbidden)?;

        let tools = self.store.list_tools().await?;
        let tasks = self.store.list_tasks().await?;
        let issues = self.store.list_issues().await?;
        let pending = self
            .store
            .list_requests_by_status(RequestStatus::Pending)
            .await?;

        Ok(OwnerOverview {
            tools: count_tools(&tools),
            tasks: count_tasks(&tasks),
            open_issues: issues.iter().filter(|issue| issue.is_open()).count(),
            pending_requests: pending.len(),
        })
    }

    /// Summarizes the acting worker's own records for their dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not a worker.
    pub async fn worker_overview(&self, actor: Actor) -> LifecycleResult<WorkerOverview> {
        actor
            .ensure_worker("worker_overview")
            .map_err(LifecycleError::forbidden)?;

        let tasks = self.store.list_tasks_for_worker(actor.user_id()).await?;
        let requests = self
            .store
            .list_requests_for_worker(actor.user_id())
            .await?;

        Ok(WorkerOverview {
            tasks: count_tasks(&tasks),
            pending_requests: requests
                .iter()
                .filter(|request| request.is_pending())
                .count(),
        })
    }
}

fn ensure_can_read_worker_records(actor: Actor, subject: UserId) -> LifecycleResult<()> {
    match actor.role() {
        Role::Owner => Ok(()),
        Role::Worker if actor.user_id() == subject => Ok(()),
        Role::Worker => Err(LifecycleError::forbidden(AccessDenied::NotRecordOwner {
            actor: actor.user_id(),
            subject,
        })),
    }
}

fn count_tools(tools: &[Tool]) -> ToolStatusCounts {
    let mut counts = ToolStatusCounts::default();
    for tool in tools {
        match tool.status() {
            ToolStatus::Available => counts.available += 1,
            ToolStatus::InUse => counts.in_use += 1,
            ToolStatus::Maintenance => counts.maintenance += 1,
        }
    }
    counts
}

fn count_tasks(tasks: &[Task]) -> TaskStatusCounts {
    let mut counts = TaskStatusCounts::default();
    for task in tasks {
        match task.status() {
            TaskStatus::Pending => counts.pending += 1,
            TaskStatus::InProgress => counts.in_progress += 1,
            TaskStatus::Completed => counts.completed += 1,
        }
    }
    counts
}
