//! In-memory workshop store for tests and lightweight embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{
    EmailAddress, EntityRef, IssueId, JobRequest, RequestId, RequestStatus, Role, Task, TaskId,
    Tool, ToolId, ToolIssue, ToolStatus, User, UserId, Username,
};
use crate::ports::{ToolCascade, WorkshopStore, WorkshopStoreError, WorkshopStoreResult};

/// Thread-safe in-memory workshop store.
///
/// Every mutating method holds the write lock for the whole mutation, so
/// each call is one atomic unit of work, matching the port contract.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkshopStore {
    state: Arc<RwLock<WorkshopState>>,
}

#[derive(Debug, Default)]
struct WorkshopState {
    users: HashMap<UserId, User>,
    username_index: HashMap<Username, UserId>,
    email_index: HashMap<EmailAddress, UserId>,
    tools: HashMap<ToolId, Tool>,
    tasks: HashMap<TaskId, Task>,
    issues: HashMap<IssueId, ToolIssue>,
    requests: HashMap<RequestId, JobRequest>,
}

impl InMemoryWorkshopStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> WorkshopStoreResult<RwLockReadGuard<'_, WorkshopState>> {
        self.state.read().map_err(|err| {
            WorkshopStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> WorkshopStoreResult<RwLockWriteGuard<'_, WorkshopState>> {
        self.state.write().map_err(|err| {
            WorkshopStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Recomputes and stores the derived status of one tool.
fn refresh_tool_status(state: &mut WorkshopState, tool_id: ToolId) {
    let has_open_issues = state
        .issues
        .values()
        .any(|issue| issue.tool_id() == tool_id && issue.is_open());
    let has_active_tasks = state
        .tasks
        .values()
        .any(|task| task.tool_id() == Some(tool_id) && task.is_active());

    if let Some(tool) = state.tools.get_mut(&tool_id) {
        tool.refresh_status(ToolStatus::derive(has_open_issues, has_active_tasks));
    }
}

fn ensure_user_exists(state: &WorkshopState, id: UserId) -> WorkshopStoreResult<()> {
    if state.users.contains_key(&id) {
        return Ok(());
    }
    Err(WorkshopStoreError::Missing(EntityRef::User(id)))
}

fn ensure_tool_exists(state: &WorkshopState, id: ToolId) -> WorkshopStoreResult<()> {
    if state.tools.contains_key(&id) {
        return Ok(());
    }
    Err(WorkshopStoreError::Missing(EntityRef::Tool(id)))
}

/// Validates the worker and optional tool references carried by a task.
fn check_task_references(state: &WorkshopState, task: &Task) -> WorkshopStoreResult<()> {
    ensure_user_exists(state, task.worker_id())?;
    if let Some(tool_id) = task.tool_id() {
        ensure_tool_exists(state, tool_id)?;
    }
    Ok(())
}

fn sorted_tools<'a>(tools: impl Iterator<Item = &'a Tool>) -> Vec<Tool> {
    let mut collected: Vec<Tool> = tools.cloned().collect();
    collected.sort_by(|a, b| {
        a.name()
            .as_str()
            .cmp(b.name().as_str())
            .then_with(|| a.id().into_inner().cmp(&b.id().into_inner()))
    });
    collected
}

fn sorted_tasks<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut collected: Vec<Task> = tasks.cloned().collect();
    collected.sort_by(|a, b| {
        b.assigned_date()
            .cmp(&a.assigned_date())
            .then_with(|| a.id().into_inner().cmp(&b.id().into_inner()))
    });
    collected
}

fn sorted_requests<'a>(requests: impl Iterator<Item = &'a JobRequest>) -> Vec<JobRequest> {
    let mut collected: Vec<JobRequest> = requests.cloned().collect();
    collected.sort_by(|a, b| {
        b.requested_date()
            .cmp(&a.requested_date())
            .then_with(|| a.id().into_inner().cmp(&b.id().into_inner()))
    });
    collected
}

#[async_trait]
impl WorkshopStore for InMemoryWorkshopStore {
    async fn insert_user(&self, user: &User) -> WorkshopStoreResult<()> {
        let mut state = self.write_state()?;
        if state.users.contains_key(&user.id()) {
            return Err(WorkshopStoreError::Duplicate(EntityRef::User(user.id())));
        }
        if state.username_index.contains_key(user.username()) {
            return Err(WorkshopStoreError::UsernameTaken(user.username().clone()));
        }
        if state.email_index.contains_key(user.email()) {
            return Err(WorkshopStoreError::EmailTaken(user.email().clone()));
        }

        state
            .username_index
            .insert(user.username().clone(), user.id());
        state.email_index.insert(user.email().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_user(&self, id: UserId) -> WorkshopStoreResult<Option<User>> {
        let state = self.read_state()?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_user_by_username(
        &self,
        username: &Username,
    ) -> WorkshopStoreResult<Option<User>> {
        let state = self.read_state()?;
        let user = state
            .username_index
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn list_users_by_role(&self, role: Role) -> WorkshopStoreResult<Vec<User>> {
        let state = self.read_state()?;
        let mut users: Vec<User> = state
            .users
            .values()
            .filter(|user| user.role() == role)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username().as_str().cmp(b.username().as_str()));
        Ok(users)
    }

    async fn insert_tool(&self, tool: &Tool) -> WorkshopStoreResult<()> {
        let mut state = self.write_state()?;
        if state.tools.contains_key(&tool.id()) {
            return Err(WorkshopStoreError::Duplicate(EntityRef::Tool(tool.id())));
        }
        state.tools.insert(tool.id(), tool.clone());
        Ok(())
    }

    async fn update_tool(&self, tool: &Tool) -> WorkshopStoreResult<()> {
        let mut state = self.write_state()?;
        if !state.tools.contains_key(&tool.id()) {
            return Err(WorkshopStoreError::Missing(EntityRef::Tool(tool.id())));
        }
        state.tools.insert(tool.id(), tool.clone());
        Ok(())
    }

    async fn find_tool(&self, id: ToolId) -> WorkshopStoreResult<Option<Tool>> {
        let state = self.read_state()?;
        Ok(state.tools.get(&id).cloned())
    }

    async fn list_tools(&self) -> WorkshopStoreResult<Vec<Tool>> {
        let state = self.read_state()?;
        Ok(sorted_tools(state.tools.values()))
    }

    async fn list_tools_by_status(&self, status: ToolStatus) -> WorkshopStoreResult<Vec<Tool>> {
        let state = self.read_state()?;
        Ok(sorted_tools(
            state
                .tools
                .values()
                .filter(|tool| tool.status() == status),
        ))
    }

    async fn delete_tool(&self, id: ToolId) -> WorkshopStoreResult<ToolCascade> {
        let mut state = self.write_state()?;
        let tool = state
            .tools
            .get(&id)
            .cloned()
            .ok_or(WorkshopStoreError::Missing(EntityRef::Tool(id)))?;

        let tasks_before = state.tasks.len();
        state.tasks.retain(|_, task| task.tool_id() != Some(id));
        let tasks_removed = tasks_before - state.tasks.len();

        let issues_before = state.issues.len();
        state.issues.retain(|_, issue| issue.tool_id() != id);
        let issues_removed = issues_before - state.issues.len();

        let requests_before = state.requests.len();
        state
            .requests
            .retain(|_, request| request.tool_id() != Some(id));
        let requests_removed = requests_before - state.requests.len();

        state.tools.remove(&id);
        Ok(ToolCascade {
            tool,
            tasks_removed,
            issues_removed,
            requests_removed,
        })
    }

    async fn insert_task(&self, task: &Task) -> WorkshopStoreResult<()> {
        let mut state = self.write_state()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(WorkshopStoreError::Duplicate(EntityRef::Task(task.id())));
        }
        check_task_references(&state, task)?;

        state.tasks.insert(task.id(), task.clone());
        if let Some(tool_id) = task.tool_id() {
            refresh_tool_status(&mut state, tool_id);
        }
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> WorkshopStoreResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(WorkshopStoreError::Missing(EntityRef::Task(task.id())));
        }

        state.tasks.insert(task.id(), task.clone());
        if let Some(tool_id) = task.tool_id() {
            refresh_tool_status(&mut state, tool_id);
        }
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> WorkshopStoreResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_tasks(&self) -> WorkshopStoreResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(sorted_tasks(state.tasks.values()))
    }

    async fn list_tasks_for_worker(&self, worker_id: UserId) -> WorkshopStoreResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(sorted_tasks(
            state
                .tasks
                .values()
                .filter(|task| task.worker_id() == worker_id),
        ))
    }

    async fn insert_issue(&self, issue: &ToolIssue) -> WorkshopStoreResult<()> {
        let mut state = self.write_state()?;
        if state.issues.contains_key(&issue.id()) {
            return Err(WorkshopStoreError::Duplicate(EntityRef::Issue(issue.id())));
        }
        ensure_user_exists(&state, issue.reporter_id())?;
        ensure_tool_exists(&state, issue.tool_id())?;

        state.issues.insert(issue.id(), issue.clone());
        refresh_tool_status(&mut state, issue.tool_id());
        Ok(())
    }

    async fn update_issue(&self, issue: &ToolIssue) -> WorkshopStoreResult<()> {
        let mut state = self.write_state()?;
        if !state.issues.contains_key(&issue.id()) {
            return Err(WorkshopStoreError::Missing(EntityRef::Issue(issue.id())));
        }

        state.issues.insert(issue.id(), issue.clone());
        refresh_tool_status(&mut state, issue.tool_id());
        Ok(())
    }

    async fn find_issue(&self, id: IssueId) -> WorkshopStoreResult<Option<ToolIssue>> {
        let state = self.read_state()?;
        Ok(state.issues.get(&id).cloned())
    }

    async fn list_issues(&self) -> WorkshopStoreResult<Vec<ToolIssue>> {
        let state = self.read_state()?;
        let mut issues: Vec<ToolIssue> = state.issues.values().cloned().collect();
        issues.sort_by(|a, b| {
            b.reported_date()
                .cmp(&a.reported_date())
                .then_with(|| a.id().into_inner().cmp(&b.id().into_inner()))
        });
        Ok(issues)
    }

    async fn insert_request(&self, request: &JobRequest) -> WorkshopStoreResult<()> {
        let mut state = self.write_state()?;
        if state.requests.contains_key(&request.id()) {
            return Err(WorkshopStoreError::Duplicate(EntityRef::Request(
                request.id(),
            )));
        }
        ensure_user_exists(&state, request.requester_id())?;
        if let Some(tool_id) = request.tool_id() {
            ensure_tool_exists(&state, tool_id)?;
        }

        state.requests.insert(request.id(), request.clone());
        Ok(())
    }

    async fn update_request(&self, request: &JobRequest) -> WorkshopStoreResult<()> {
        let mut state = self.write_state()?;
        if !state.requests.contains_key(&request.id()) {
            return Err(WorkshopStoreError::Missing(EntityRef::Request(
                request.id(),
            )));
        }

        state.requests.insert(request.id(), request.clone());
        Ok(())
    }

    async fn record_approval(
        &self,
        request: &JobRequest,
        task: &Task,
    ) -> WorkshopStoreResult<()> {
        let mut state = self.write_state()?;
        if !state.requests.contains_key(&request.id()) {
            return Err(WorkshopStoreError::Missing(EntityRef::Request(
                request.id(),
            )));
        }
        if state.tasks.contains_key(&task.id()) {
            return Err(WorkshopStoreError::Duplicate(EntityRef::Task(task.id())));
        }
        check_task_references(&state, task)?;

        state.requests.insert(request.id(), request.clone());
        state.tasks.insert(task.id(), task.clone());
        if let Some(tool_id) = task.tool_id() {
            refresh_tool_status(&mut state, tool_id);
        }
        Ok(())
    }

    async fn find_request(&self, id: RequestId) -> WorkshopStoreResult<Option<JobRequest>> {
        let state = self.read_state()?;
        Ok(state.requests.get(&id).cloned())
    }

    async fn list_requests_by_status(
        &self,
        status: RequestStatus,
    ) -> WorkshopStoreResult<Vec<JobRequest>> {
        let state = self.read_state()?;
        Ok(sorted_requests(
            state
                .requests
                .values()
                .filter(|request| request.status() == status),
        ))
    }

    async fn list_requests_for_worker(
        &self,
        requester_id: UserId,
    ) -> WorkshopStoreResult<Vec<JobRequest>> {
        let state = self.read_state()?;
        Ok(sorted_requests(
            state
                .requests
                .values()
                .filter(|request| request.requester_id() == requester_id),
        ))
    }
}
