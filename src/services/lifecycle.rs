//! Service layer for tool, task, issue, and job request lifecycles.

use super::error::{LifecycleError, LifecycleResult};
use crate::domain::{
    AccessDenied, Actor, DomainError, EntityRef, IssueId, IssueStatus, JobRequest, RequestId,
    Task, TaskId, TaskPriority, TaskStatus, Title, Tool, ToolEdit, ToolId, ToolIssue, ToolStatus,
    User, UserId,
};
use crate::ports::{ToolCascade, WorkshopStore};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Title prefix marking a task created from an approved job request.
const WORKER_REQUEST_PREFIX: &str = "Worker request: ";

/// Request payload for registering a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTool {
    name: String,
    description: Option<String>,
}

impl NewTool {
    /// Creates a payload with the required tool name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the free-form description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Replacement values for an owner's tool edit.
///
/// Every field overwrites the stored one, so an absent description clears
/// the stored description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolUpdate {
    name: String,
    description: Option<String>,
    status: ToolStatus,
    last_maintenance: Option<DateTime<Utc>>,
}

impl ToolUpdate {
    /// Creates a payload with the required replacement fields.
    #[must_use]
    pub fn new(name: impl Into<String>, status: ToolStatus) -> Self {
        Self {
            name: name.into(),
            description: None,
            status,
            last_maintenance: None,
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement latest maintenance date.
    #[must_use]
    pub const fn with_last_maintenance(mut self, date: DateTime<Utc>) -> Self {
        self.last_maintenance = Some(date);
        self
    }
}

/// Request payload for assigning a task to a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAssignment {
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    worker_id: UserId,
    tool_id: Option<ToolId>,
}

impl TaskAssignment {
    /// Creates a payload with the required assignment fields.
    #[must_use]
    pub fn new(title: impl Into<String>, priority: TaskPriority, worker_id: UserId) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority,
            worker_id,
            tool_id: None,
        }
    }

    /// Sets the free-form description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Associates the task with a tool.
    #[must_use]
    pub const fn with_tool(mut self, tool_id: ToolId) -> Self {
        self.tool_id = Some(tool_id);
        self
    }
}

/// Request payload for reporting a tool issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReport {
    title: String,
    description: String,
    tool_id: ToolId,
}

impl IssueReport {
    /// Creates a payload with the required report fields.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, tool_id: ToolId) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tool_id,
        }
    }
}

/// Request payload for submitting a job request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequestSubmission {
    title: String,
    description: String,
    tool_id: Option<ToolId>,
}

impl JobRequestSubmission {
    /// Creates a payload with the required request fields.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tool_id: None,
        }
    }

    /// Associates the request with a tool.
    #[must_use]
    pub const fn with_tool(mut self, tool_id: ToolId) -> Self {
        self.tool_id = Some(tool_id);
        self
    }
}

/// Owner's decision on a pending job request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    /// Approve the request and create a task from it.
    Approve {
        /// Priority assigned to the created task.
        priority: TaskPriority,
    },
    /// Decline the request.
    Decline,
}

/// Outcome of processing a job request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedRequest {
    /// The decided request.
    pub request: JobRequest,
    /// Task created from the request, present after an approval.
    pub task: Option<Task>,
}

/// Workshop lifecycle orchestration service.
#[derive(Clone)]
pub struct LifecycleService<S, C>
where
    S: WorkshopStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> LifecycleService<S, C>
where
    S: WorkshopStore,
    C: Clock + Send + Sync,
{
    /// Creates a new lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Registers a new tool, initially available.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not an owner,
    /// or [`LifecycleError::Validation`] when the name fails validation.
    pub async fn add_tool(&self, actor: Actor, tool: NewTool) -> LifecycleResult<Tool> {
        actor.ensure_owner("add_tool").map_err(LifecycleError::forbidden)?;

        let name = Title::new(tool.name)?;
        let record = Tool::new(name, tool.description, &*self.clock);
        self.store.insert_tool(&record).await?;
        Ok(record)
    }

    /// Overwrites a tool's editable fields with the owner's values.
    ///
    /// This is the manual override path: the submitted status is stored
    /// as-is and stands until the next recomputation from open work.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not an owner,
    /// [`LifecycleError::NotFound`] when the tool does not exist, or
    /// [`LifecycleError::Validation`] when the name fails validation.
    pub async fn edit_tool(
        &self,
        actor: Actor,
        tool_id: ToolId,
        update: ToolUpdate,
    ) -> LifecycleResult<Tool> {
        actor.ensure_owner("edit_tool").map_err(LifecycleError::forbidden)?;

        let ToolUpdate {
            name: raw_name,
            description,
            status,
            last_maintenance,
        } = update;
        let name = Title::new(raw_name)?;

        let mut tool = self.find_tool_or_error(tool_id).await?;
        tool.apply_edit(
            ToolEdit {
                name,
                description,
                status,
                last_maintenance,
            },
            &*self.clock,
        );
        self.store.update_tool(&tool).await?;
        Ok(tool)
    }

    /// Deletes a tool together with every record referencing it.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not an owner,
    /// or [`LifecycleError::NotFound`] when the tool does not exist.
    pub async fn delete_tool(&self, actor: Actor, tool_id: ToolId) -> LifecycleResult<ToolCascade> {
        actor.ensure_owner("delete_tool").map_err(LifecycleError::forbidden)?;
        Ok(self.store.delete_tool(tool_id).await?)
    }

    /// Assigns a new pending task to a worker.
    ///
    /// When the task references a tool, the store's status recomputation
    /// marks that tool in use unless an open issue holds it in maintenance.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not an owner,
    /// [`LifecycleError::NotFound`] when the worker or tool does not exist,
    /// or [`LifecycleError::Validation`] when the title fails validation or
    /// the assignee does not hold the worker role.
    pub async fn assign_task(
        &self,
        actor: Actor,
        assignment: TaskAssignment,
    ) -> LifecycleResult<Task> {
        actor.ensure_owner("assign_task").map_err(LifecycleError::forbidden)?;

        let TaskAssignment {
            title: raw_title,
            description,
            priority,
            worker_id,
            tool_id,
        } = assignment;
        let title = Title::new(raw_title)?;

        let worker = self.find_user_or_error(worker_id).await?;
        if !worker.is_worker() {
            return Err(DomainError::AssigneeNotWorker { user_id: worker_id }.into());
        }

        let task = Task::new(title, description, priority, worker_id, tool_id, &*self.clock);
        self.store.insert_task(&task).await?;
        Ok(task)
    }

    /// Moves a task to a new lifecycle status.
    ///
    /// Only the assigned worker may move their task, and only forward.
    /// Completing the last active task against a tool releases the tool
    /// through the store's status recomputation.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not the
    /// task's assigned worker, [`LifecycleError::NotFound`] when the task
    /// does not exist, or [`LifecycleError::Conflict`] when the move is not
    /// a permitted forward transition.
    pub async fn update_task_status(
        &self,
        actor: Actor,
        task_id: TaskId,
        status: TaskStatus,
    ) -> LifecycleResult<Task> {
        actor
            .ensure_worker("update_task_status")
            .map_err(LifecycleError::forbidden)?;

        let mut task = self.find_task_or_error(task_id).await?;
        if !task.is_assigned_to(actor.user_id()) {
            return Err(LifecycleError::forbidden(AccessDenied::NotTaskAssignee {
                actor: actor.user_id(),
                task_id,
            }));
        }

        task.transition_to(status, &*self.clock)?;
        self.store.update_task(&task).await?;
        Ok(task)
    }

    /// Reports an issue against a tool.
    ///
    /// The store's status recomputation puts the tool in maintenance.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not a worker,
    /// [`LifecycleError::NotFound`] when the tool does not exist, or
    /// [`LifecycleError::Validation`] when the title or description fails
    /// validation.
    pub async fn report_issue(
        &self,
        actor: Actor,
        report: IssueReport,
    ) -> LifecycleResult<ToolIssue> {
        actor.ensure_worker("report_issue").map_err(LifecycleError::forbidden)?;

        let IssueReport {
            title: raw_title,
            description,
            tool_id,
        } = report;
        let title = Title::new(raw_title)?;

        let issue = ToolIssue::new(title, description, actor.user_id(), tool_id, &*self.clock)?;
        self.store.insert_issue(&issue).await?;
        Ok(issue)
    }

    /// Moves an issue to a new triage status.
    ///
    /// Resolving the last open issue against a tool releases the tool from
    /// maintenance through the store's status recomputation.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not an owner,
    /// [`LifecycleError::NotFound`] when the issue does not exist, or
    /// [`LifecycleError::Conflict`] when the move is not a permitted forward
    /// transition.
    pub async fn update_issue_status(
        &self,
        actor: Actor,
        issue_id: IssueId,
        status: IssueStatus,
    ) -> LifecycleResult<ToolIssue> {
        actor
            .ensure_owner("update_issue_status")
            .map_err(LifecycleError::forbidden)?;

        let mut issue = self.find_issue_or_error(issue_id).await?;
        issue.transition_to(status, &*self.clock)?;
        self.store.update_issue(&issue).await?;
        Ok(issue)
    }

    /// Submits a pending job request on behalf of the acting worker.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not a worker,
    /// [`LifecycleError::NotFound`] when the referenced tool does not exist,
    /// or [`LifecycleError::Validation`] when the title or description fails
    /// validation.
    pub async fn submit_job_request(
        &self,
        actor: Actor,
        submission: JobRequestSubmission,
    ) -> LifecycleResult<JobRequest> {
        actor
            .ensure_worker("submit_job_request")
            .map_err(LifecycleError::forbidden)?;

        let JobRequestSubmission {
            title: raw_title,
            description,
            tool_id,
        } = submission;
        let title = Title::new(raw_title)?;

        let request = JobRequest::new(title, description, actor.user_id(), tool_id, &*self.clock)?;
        self.store.insert_request(&request).await?;
        Ok(request)
    }

    /// Decides a pending job request.
    ///
    /// Approving creates a task for the requester, carrying the request's
    /// description and tool at the chosen priority, and commits the decision
    /// and the task as one unit of work. Declining updates the request only.
    /// Either way the decision is final.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] when the actor is not an owner,
    /// [`LifecycleError::NotFound`] when the request does not exist, or
    /// [`LifecycleError::Conflict`] when the request was already decided.
    pub async fn process_job_request(
        &self,
        actor: Actor,
        request_id: RequestId,
        decision: RequestDecision,
    ) -> LifecycleResult<ProcessedRequest> {
        actor
            .ensure_owner("process_job_request")
            .map_err(LifecycleError::forbidden)?;

        let mut request = self.find_request_or_error(request_id).await?;
        match decision {
            RequestDecision::Approve { priority } => {
                request.approve(&*self.clock)?;

                let title = Title::prefixed(WORKER_REQUEST_PREFIX, request.title());
                let task = Task::new(
                    title,
                    Some(request.description().to_owned()),
                    priority,
                    request.requester_id(),
                    request.tool_id(),
                    &*self.clock,
                );
                self.store.record_approval(&request, &task).await?;
                Ok(ProcessedRequest {
                    request,
                    task: Some(task),
                })
            }
            RequestDecision::Decline => {
                request.decline(&*self.clock)?;
                self.store.update_request(&request).await?;
                Ok(ProcessedRequest {
                    request,
                    task: None,
                })
            }
        }
    }

    async fn find_user_or_error(&self, id: UserId) -> LifecycleResult<User> {
        self.store
            .find_user(id)
            .await?
            .ok_or(LifecycleError::NotFound(EntityRef::User(id)))
    }

    async fn find_tool_or_error(&self, id: ToolId) -> LifecycleResult<Tool> {
        self.store
            .find_tool(id)
            .await?
            .ok_or(LifecycleError::NotFound(EntityRef::Tool(id)))
    }

    async fn find_task_or_error(&self, id: TaskId) -> LifecycleResult<Task> {
        self.store
            .find_task(id)
            .await?
            .ok_or(LifecycleError::NotFound(EntityRef::Task(id)))
    }

    async fn find_issue_or_error(&self, id: IssueId) -> LifecycleResult<ToolIssue> {
        self.store
            .find_issue(id)
            .await?
            .ok_or(LifecycleError::NotFound(EntityRef::Issue(id)))
    }

    async fn find_request_or_error(&self, id: RequestId) -> LifecycleResult<JobRequest> {
        self.store
            .find_request(id)
            .await?
            .ok_or(LifecycleError::NotFound(EntityRef::Request(id)))
    }
}
