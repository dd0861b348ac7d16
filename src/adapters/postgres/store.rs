//! `PostgreSQL` workshop store implementation.
//!
//! Every mutating method runs inside a single transaction when it touches
//! more than one statement, so the port's unit-of-work contract holds.
//! Mutations that change the open work recorded against a tool recompute
//! the tool's stored status inside the same transaction.

use super::models::{
    IssueRow, NewIssueRow, NewRequestRow, NewTaskRow, NewToolRow, NewUserRow, RequestRow, TaskRow,
    ToolRow, UserRow,
};
use super::schema::{job_requests, tasks, tool_issues, tools, users};
use crate::domain::{
    EmailAddress, EntityRef, IssueId, IssueStatus, JobRequest, PasswordHash, PersistedIssueData,
    PersistedRequestData, PersistedTaskData, PersistedToolData, PersistedUserData, RequestId,
    RequestStatus, Role, Task, TaskId, TaskPriority, TaskStatus, Title, Tool, ToolId, ToolIssue,
    ToolStatus, User, UserId, Username,
};
use crate::ports::{ToolCascade, WorkshopStore, WorkshopStoreError, WorkshopStoreResult};
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by workshop adapters.
pub type WorkshopPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed workshop store.
#[derive(Debug, Clone)]
pub struct PostgresWorkshopStore {
    pool: WorkshopPgPool,
}

impl PostgresWorkshopStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkshopPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkshopStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkshopStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WorkshopStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkshopStoreError::persistence)?
    }
}

/// Bridges semantic store errors and database errors inside a transaction
/// closure, which Diesel requires to use a single error type convertible
/// from [`DieselError`].
#[derive(Debug)]
enum TxError {
    Store(WorkshopStoreError),
    Database(DieselError),
}

impl From<DieselError> for TxError {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

impl From<WorkshopStoreError> for TxError {
    fn from(err: WorkshopStoreError) -> Self {
        Self::Store(err)
    }
}

impl TxError {
    fn into_store_error(self) -> WorkshopStoreError {
        match self {
            Self::Store(err) => err,
            Self::Database(err) => WorkshopStoreError::persistence(err),
        }
    }
}

#[async_trait]
impl WorkshopStore for PostgresWorkshopStore {
    async fn insert_user(&self, user: &User) -> WorkshopStoreResult<()> {
        let user_id = user.id();
        let username = user.username().clone();
        let email = user.email().clone();
        let new_row = user_to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_constraint(info.as_ref(), "users_username_key") =>
                    {
                        WorkshopStoreError::UsernameTaken(username.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_constraint(info.as_ref(), "users_email_key") =>
                    {
                        WorkshopStoreError::EmailTaken(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkshopStoreError::Duplicate(EntityRef::User(user_id))
                    }
                    _ => WorkshopStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_user(&self, id: UserId) -> WorkshopStoreResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(WorkshopStoreError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_user_by_username(
        &self,
        username: &Username,
    ) -> WorkshopStoreResult<Option<User>> {
        let username_str = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::username.eq(&username_str))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(WorkshopStoreError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list_users_by_role(&self, role: Role) -> WorkshopStoreResult<Vec<User>> {
        let role_str = role.as_str();
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::role.eq(role_str))
                .order(users::username.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(WorkshopStoreError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn insert_tool(&self, tool: &Tool) -> WorkshopStoreResult<()> {
        let tool_id = tool.id();
        let new_row = tool_to_new_row(tool);

        self.run_blocking(move |connection| {
            diesel::insert_into(tools::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkshopStoreError::Duplicate(EntityRef::Tool(tool_id))
                    }
                    _ => WorkshopStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_tool(&self, tool: &Tool) -> WorkshopStoreResult<()> {
        let tool_id = tool.id();
        let name = tool.name().as_str().to_owned();
        let description = tool.description().map(ToOwned::to_owned);
        let status = tool.status().as_str();
        let last_maintenance = tool.last_maintenance();
        let updated_at = tool.updated_at();

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(tools::table.filter(tools::id.eq(tool_id.into_inner())))
                    .set((
                        tools::name.eq(&name),
                        tools::description.eq(&description),
                        tools::status.eq(status),
                        tools::last_maintenance.eq(last_maintenance),
                        tools::updated_at.eq(updated_at),
                    ))
                    .execute(connection)
                    .map_err(WorkshopStoreError::persistence)?;

            if updated_count == 0 {
                return Err(WorkshopStoreError::Missing(EntityRef::Tool(tool_id)));
            }
            Ok(())
        })
        .await
    }

    async fn find_tool(&self, id: ToolId) -> WorkshopStoreResult<Option<Tool>> {
        self.run_blocking(move |connection| {
            let row = tools::table
                .filter(tools::id.eq(id.into_inner()))
                .select(ToolRow::as_select())
                .first::<ToolRow>(connection)
                .optional()
                .map_err(WorkshopStoreError::persistence)?;
            row.map(row_to_tool).transpose()
        })
        .await
    }

    async fn list_tools(&self) -> WorkshopStoreResult<Vec<Tool>> {
        self.run_blocking(move |connection| {
            let rows = tools::table
                .order((tools::name.asc(), tools::id.asc()))
                .select(ToolRow::as_select())
                .load::<ToolRow>(connection)
                .map_err(WorkshopStoreError::persistence)?;
            rows.into_iter().map(row_to_tool).collect()
        })
        .await
    }

    async fn list_tools_by_status(&self, status: ToolStatus) -> WorkshopStoreResult<Vec<Tool>> {
        let status_str = status.as_str();
        self.run_blocking(move |connection| {
            let rows = tools::table
                .filter(tools::status.eq(status_str))
                .order((tools::name.asc(), tools::id.asc()))
                .select(ToolRow::as_select())
                .load::<ToolRow>(connection)
                .map_err(WorkshopStoreError::persistence)?;
            rows.into_iter().map(row_to_tool).collect()
        })
        .await
    }

    async fn delete_tool(&self, id: ToolId) -> WorkshopStoreResult<ToolCascade> {
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    let tool_uuid = id.into_inner();
                    let row = tools::table
                        .filter(tools::id.eq(tool_uuid))
                        .select(ToolRow::as_select())
                        .first::<ToolRow>(tx)
                        .optional()?
                        .ok_or(WorkshopStoreError::Missing(EntityRef::Tool(id)))?;
                    let tool = row_to_tool(row)?;

                    let tasks_removed =
                        diesel::delete(tasks::table.filter(tasks::tool_id.eq(Some(tool_uuid))))
                            .execute(tx)?;
                    let issues_removed = diesel::delete(
                        tool_issues::table.filter(tool_issues::tool_id.eq(tool_uuid)),
                    )
                    .execute(tx)?;
                    let requests_removed = diesel::delete(
                        job_requests::table.filter(job_requests::tool_id.eq(Some(tool_uuid))),
                    )
                    .execute(tx)?;
                    diesel::delete(tools::table.filter(tools::id.eq(tool_uuid))).execute(tx)?;

                    Ok(ToolCascade {
                        tool,
                        tasks_removed,
                        issues_removed,
                        requests_removed,
                    })
                })
                .map_err(TxError::into_store_error)
        })
        .await
    }

    async fn insert_task(&self, task: &Task) -> WorkshopStoreResult<()> {
        let task_id = task.id();
        let worker_id = task.worker_id();
        let maybe_tool_id = task.tool_id();
        let new_row = task_to_new_row(task);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    ensure_user_exists(tx, worker_id)?;
                    if let Some(tool_id) = maybe_tool_id {
                        ensure_tool_exists(tx, tool_id)?;
                    }

                    diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .execute(tx)
                        .map_err(|err| {
                            map_task_insert_error(err, task_id, worker_id, maybe_tool_id)
                        })?;

                    if let Some(tool_id) = maybe_tool_id {
                        refresh_tool_status(tx, tool_id)?;
                    }
                    Ok(())
                })
                .map_err(TxError::into_store_error)
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> WorkshopStoreResult<()> {
        let task_id = task.id();
        let maybe_tool_id = task.tool_id();
        let status = task.status().as_str();
        let completed_date = task.completed_date();
        let updated_at = task.updated_at();

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    let updated_count =
                        diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                            .set((
                                tasks::status.eq(status),
                                tasks::completed_date.eq(completed_date),
                                tasks::updated_at.eq(updated_at),
                            ))
                            .execute(tx)?;

                    if updated_count == 0 {
                        return Err(WorkshopStoreError::Missing(EntityRef::Task(task_id)).into());
                    }

                    if let Some(tool_id) = maybe_tool_id {
                        refresh_tool_status(tx, tool_id)?;
                    }
                    Ok(())
                })
                .map_err(TxError::into_store_error)
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> WorkshopStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(WorkshopStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_tasks(&self) -> WorkshopStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .order((tasks::assigned_date.desc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(WorkshopStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_tasks_for_worker(&self, worker_id: UserId) -> WorkshopStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::worker_id.eq(worker_id.into_inner()))
                .order((tasks::assigned_date.desc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(WorkshopStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn insert_issue(&self, issue: &ToolIssue) -> WorkshopStoreResult<()> {
        let issue_id = issue.id();
        let reporter_id = issue.reporter_id();
        let tool_id = issue.tool_id();
        let new_row = issue_to_new_row(issue);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    ensure_user_exists(tx, reporter_id)?;
                    ensure_tool_exists(tx, tool_id)?;

                    diesel::insert_into(tool_issues::table)
                        .values(&new_row)
                        .execute(tx)
                        .map_err(|err| match err {
                            DieselError::DatabaseError(
                                DatabaseErrorKind::UniqueViolation,
                                _,
                            ) => TxError::Store(WorkshopStoreError::Duplicate(EntityRef::Issue(
                                issue_id,
                            ))),
                            _ => TxError::Database(err),
                        })?;

                    refresh_tool_status(tx, tool_id)?;
                    Ok(())
                })
                .map_err(TxError::into_store_error)
        })
        .await
    }

    async fn update_issue(&self, issue: &ToolIssue) -> WorkshopStoreResult<()> {
        let issue_id = issue.id();
        let tool_id = issue.tool_id();
        let status = issue.status().as_str();
        let updated_at = issue.updated_at();

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    let updated_count = diesel::update(
                        tool_issues::table.filter(tool_issues::id.eq(issue_id.into_inner())),
                    )
                    .set((
                        tool_issues::status.eq(status),
                        tool_issues::updated_at.eq(updated_at),
                    ))
                    .execute(tx)?;

                    if updated_count == 0 {
                        return Err(
                            WorkshopStoreError::Missing(EntityRef::Issue(issue_id)).into()
                        );
                    }

                    refresh_tool_status(tx, tool_id)?;
                    Ok(())
                })
                .map_err(TxError::into_store_error)
        })
        .await
    }

    async fn find_issue(&self, id: IssueId) -> WorkshopStoreResult<Option<ToolIssue>> {
        self.run_blocking(move |connection| {
            let row = tool_issues::table
                .filter(tool_issues::id.eq(id.into_inner()))
                .select(IssueRow::as_select())
                .first::<IssueRow>(connection)
                .optional()
                .map_err(WorkshopStoreError::persistence)?;
            row.map(row_to_issue).transpose()
        })
        .await
    }

    async fn list_issues(&self) -> WorkshopStoreResult<Vec<ToolIssue>> {
        self.run_blocking(move |connection| {
            let rows = tool_issues::table
                .order((tool_issues::reported_date.desc(), tool_issues::id.asc()))
                .select(IssueRow::as_select())
                .load::<IssueRow>(connection)
                .map_err(WorkshopStoreError::persistence)?;
            rows.into_iter().map(row_to_issue).collect()
        })
        .await
    }

    async fn insert_request(&self, request: &JobRequest) -> WorkshopStoreResult<()> {
        let request_id = request.id();
        let requester_id = request.requester_id();
        let maybe_tool_id = request.tool_id();
        let new_row = request_to_new_row(request);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    ensure_user_exists(tx, requester_id)?;
                    if let Some(tool_id) = maybe_tool_id {
                        ensure_tool_exists(tx, tool_id)?;
                    }

                    diesel::insert_into(job_requests::table)
                        .values(&new_row)
                        .execute(tx)
                        .map_err(|err| match err {
                            DieselError::DatabaseError(
                                DatabaseErrorKind::UniqueViolation,
                                _,
                            ) => TxError::Store(WorkshopStoreError::Duplicate(
                                EntityRef::Request(request_id),
                            )),
                            _ => TxError::Database(err),
                        })?;
                    Ok(())
                })
                .map_err(TxError::into_store_error)
        })
        .await
    }

    async fn update_request(&self, request: &JobRequest) -> WorkshopStoreResult<()> {
        let request_id = request.id();
        let status = request.status().as_str();
        let updated_at = request.updated_at();

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                job_requests::table.filter(job_requests::id.eq(request_id.into_inner())),
            )
            .set((
                job_requests::status.eq(status),
                job_requests::updated_at.eq(updated_at),
            ))
            .execute(connection)
            .map_err(WorkshopStoreError::persistence)?;

            if updated_count == 0 {
                return Err(WorkshopStoreError::Missing(EntityRef::Request(request_id)));
            }
            Ok(())
        })
        .await
    }

    async fn record_approval(&self, request: &JobRequest, task: &Task) -> WorkshopStoreResult<()> {
        let request_id = request.id();
        let request_status = request.status().as_str();
        let request_updated_at = request.updated_at();
        let task_id = task.id();
        let worker_id = task.worker_id();
        let maybe_tool_id = task.tool_id();
        let new_task_row = task_to_new_row(task);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    let updated_count = diesel::update(
                        job_requests::table.filter(job_requests::id.eq(request_id.into_inner())),
                    )
                    .set((
                        job_requests::status.eq(request_status),
                        job_requests::updated_at.eq(request_updated_at),
                    ))
                    .execute(tx)?;

                    if updated_count == 0 {
                        return Err(
                            WorkshopStoreError::Missing(EntityRef::Request(request_id)).into()
                        );
                    }

                    ensure_user_exists(tx, worker_id)?;
                    if let Some(tool_id) = maybe_tool_id {
                        ensure_tool_exists(tx, tool_id)?;
                    }

                    diesel::insert_into(tasks::table)
                        .values(&new_task_row)
                        .execute(tx)
                        .map_err(|err| {
                            map_task_insert_error(err, task_id, worker_id, maybe_tool_id)
                        })?;

                    if let Some(tool_id) = maybe_tool_id {
                        refresh_tool_status(tx, tool_id)?;
                    }
                    Ok(())
                })
                .map_err(TxError::into_store_error)
        })
        .await
    }

    async fn find_request(&self, id: RequestId) -> WorkshopStoreResult<Option<JobRequest>> {
        self.run_blocking(move |connection| {
            let row = job_requests::table
                .filter(job_requests::id.eq(id.into_inner()))
                .select(RequestRow::as_select())
                .first::<RequestRow>(connection)
                .optional()
                .map_err(WorkshopStoreError::persistence)?;
            row.map(row_to_request).transpose()
        })
        .await
    }

    async fn list_requests_by_status(
        &self,
        status: RequestStatus,
    ) -> WorkshopStoreResult<Vec<JobRequest>> {
        let status_str = status.as_str();
        self.run_blocking(move |connection| {
            let rows = job_requests::table
                .filter(job_requests::status.eq(status_str))
                .order((job_requests::requested_date.desc(), job_requests::id.asc()))
                .select(RequestRow::as_select())
                .load::<RequestRow>(connection)
                .map_err(WorkshopStoreError::persistence)?;
            rows.into_iter().map(row_to_request).collect()
        })
        .await
    }

    async fn list_requests_for_worker(
        &self,
        requester_id: UserId,
    ) -> WorkshopStoreResult<Vec<JobRequest>> {
        self.run_blocking(move |connection| {
            let rows = job_requests::table
                .filter(job_requests::worker_id.eq(requester_id.into_inner()))
                .order((job_requests::requested_date.desc(), job_requests::id.asc()))
                .select(RequestRow::as_select())
                .load::<RequestRow>(connection)
                .map_err(WorkshopStoreError::persistence)?;
            rows.into_iter().map(row_to_request).collect()
        })
        .await
    }
}

/// Recomputes and stores the derived status of one tool.
///
/// Runs inside the caller's transaction so the recomputation observes the
/// mutation that triggered it.
fn refresh_tool_status(connection: &mut PgConnection, tool_id: ToolId) -> Result<(), TxError> {
    let tool_uuid = tool_id.into_inner();

    let has_open_issues: bool = diesel::select(exists(
        tool_issues::table
            .filter(tool_issues::tool_id.eq(tool_uuid))
            .filter(tool_issues::status.ne(IssueStatus::Resolved.as_str())),
    ))
    .get_result(connection)?;

    let has_active_tasks: bool = diesel::select(exists(
        tasks::table
            .filter(tasks::tool_id.eq(Some(tool_uuid)))
            .filter(tasks::status.ne(TaskStatus::Completed.as_str())),
    ))
    .get_result(connection)?;

    let derived = ToolStatus::derive(has_open_issues, has_active_tasks);
    diesel::update(tools::table.filter(tools::id.eq(tool_uuid)))
        .set(tools::status.eq(derived.as_str()))
        .execute(connection)?;
    Ok(())
}

/// Fails with [`WorkshopStoreError::Missing`] when the account is absent.
///
/// A pre-check inside the transaction; the foreign key still enforces
/// integrity if the row disappears between check and insert.
fn ensure_user_exists(connection: &mut PgConnection, id: UserId) -> Result<(), TxError> {
    let present: bool = diesel::select(exists(
        users::table.filter(users::id.eq(id.into_inner())),
    ))
    .get_result(connection)?;

    if present {
        return Ok(());
    }
    Err(WorkshopStoreError::Missing(EntityRef::User(id)).into())
}

/// Fails with [`WorkshopStoreError::Missing`] when the tool is absent.
fn ensure_tool_exists(connection: &mut PgConnection, id: ToolId) -> Result<(), TxError> {
    let present: bool = diesel::select(exists(
        tools::table.filter(tools::id.eq(id.into_inner())),
    ))
    .get_result(connection)?;

    if present {
        return Ok(());
    }
    Err(WorkshopStoreError::Missing(EntityRef::Tool(id)).into())
}

/// Maps task insert failures to semantic errors where the violated
/// constraint identifies one.
fn map_task_insert_error(
    err: DieselError,
    task_id: TaskId,
    worker_id: UserId,
    maybe_tool_id: Option<ToolId>,
) -> TxError {
    if let DieselError::DatabaseError(kind, ref info) = err {
        match kind {
            DatabaseErrorKind::UniqueViolation => {
                return TxError::Store(WorkshopStoreError::Duplicate(EntityRef::Task(task_id)));
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                if is_constraint(info.as_ref(), "tasks_worker_id_fkey") {
                    return TxError::Store(WorkshopStoreError::Missing(EntityRef::User(
                        worker_id,
                    )));
                }
                if let Some(tool_id) = maybe_tool_id {
                    if is_constraint(info.as_ref(), "tasks_tool_id_fkey") {
                        return TxError::Store(WorkshopStoreError::Missing(EntityRef::Tool(
                            tool_id,
                        )));
                    }
                }
            }
            _ => {}
        }
    }
    TxError::Database(err)
}

fn is_constraint(info: &dyn DatabaseErrorInformation, name: &str) -> bool {
    info.constraint_name().is_some_and(|found| found == name)
}

fn user_to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        username: user.username().as_str().to_owned(),
        email: user.email().as_str().to_owned(),
        password_hash: user.credential().as_str().to_owned(),
        role: user.role().as_str().to_owned(),
        created_at: user.created_at(),
    }
}

/// Reconstructs a domain [`User`] from a stored row.
///
/// Every persisted string is revalidated through the owning value object, so
/// a row that predates a rule change (or was edited out of band) surfaces as
/// [`WorkshopStoreError::InvalidPersistedData`] instead of a panic.
pub(crate) fn row_to_user(row: UserRow) -> WorkshopStoreResult<User> {
    let UserRow {
        id,
        username: persisted_username,
        email: persisted_email,
        password_hash,
        role: persisted_role,
        created_at,
    } = row;

    let username =
        Username::new(persisted_username).map_err(WorkshopStoreError::invalid_persisted_data)?;
    let email =
        EmailAddress::new(persisted_email).map_err(WorkshopStoreError::invalid_persisted_data)?;
    let credential = PasswordHash::from_phc_string(password_hash)
        .map_err(WorkshopStoreError::invalid_persisted_data)?;
    let role = Role::try_from(persisted_role.as_str())
        .map_err(WorkshopStoreError::invalid_persisted_data)?;

    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(id),
        username,
        email,
        credential,
        role,
        created_at,
    }))
}

fn tool_to_new_row(tool: &Tool) -> NewToolRow {
    NewToolRow {
        id: tool.id().into_inner(),
        name: tool.name().as_str().to_owned(),
        description: tool.description().map(ToOwned::to_owned),
        status: tool.status().as_str().to_owned(),
        last_maintenance: tool.last_maintenance(),
        created_at: tool.created_at(),
        updated_at: tool.updated_at(),
    }
}

/// Reconstructs a domain [`Tool`] from a stored row.
pub(crate) fn row_to_tool(row: ToolRow) -> WorkshopStoreResult<Tool> {
    let ToolRow {
        id,
        name: persisted_name,
        description,
        status: persisted_status,
        last_maintenance,
        created_at,
        updated_at,
    } = row;

    let name = Title::new(persisted_name).map_err(WorkshopStoreError::invalid_persisted_data)?;
    let status = ToolStatus::try_from(persisted_status.as_str())
        .map_err(WorkshopStoreError::invalid_persisted_data)?;

    Ok(Tool::from_persisted(PersistedToolData {
        id: ToolId::from_uuid(id),
        name,
        description,
        status,
        last_maintenance,
        created_at,
        updated_at,
    }))
}

fn task_to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        assigned_date: task.assigned_date(),
        completed_date: task.completed_date(),
        worker_id: task.worker_id().into_inner(),
        tool_id: task.tool_id().map(ToolId::into_inner),
        updated_at: task.updated_at(),
    }
}

/// Reconstructs a domain [`Task`] from a stored row.
pub(crate) fn row_to_task(row: TaskRow) -> WorkshopStoreResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        priority: persisted_priority,
        status: persisted_status,
        assigned_date,
        completed_date,
        worker_id,
        tool_id,
        updated_at,
    } = row;

    let title = Title::new(persisted_title).map_err(WorkshopStoreError::invalid_persisted_data)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(WorkshopStoreError::invalid_persisted_data)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(WorkshopStoreError::invalid_persisted_data)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        priority,
        status,
        assigned_date,
        completed_date,
        worker_id: UserId::from_uuid(worker_id),
        tool_id: tool_id.map(ToolId::from_uuid),
        updated_at,
    }))
}

fn issue_to_new_row(issue: &ToolIssue) -> NewIssueRow {
    NewIssueRow {
        id: issue.id().into_inner(),
        title: issue.title().as_str().to_owned(),
        description: issue.description().to_owned(),
        reported_date: issue.reported_date(),
        status: issue.status().as_str().to_owned(),
        reporter_id: issue.reporter_id().into_inner(),
        tool_id: issue.tool_id().into_inner(),
        updated_at: issue.updated_at(),
    }
}

/// Reconstructs a domain [`ToolIssue`] from a stored row.
pub(crate) fn row_to_issue(row: IssueRow) -> WorkshopStoreResult<ToolIssue> {
    let IssueRow {
        id,
        title: persisted_title,
        description,
        reported_date,
        status: persisted_status,
        reporter_id,
        tool_id,
        updated_at,
    } = row;

    let title = Title::new(persisted_title).map_err(WorkshopStoreError::invalid_persisted_data)?;
    let status = IssueStatus::try_from(persisted_status.as_str())
        .map_err(WorkshopStoreError::invalid_persisted_data)?;

    Ok(ToolIssue::from_persisted(PersistedIssueData {
        id: IssueId::from_uuid(id),
        title,
        description,
        reported_date,
        status,
        reporter_id: UserId::from_uuid(reporter_id),
        tool_id: ToolId::from_uuid(tool_id),
        updated_at,
    }))
}

fn request_to_new_row(request: &JobRequest) -> NewRequestRow {
    NewRequestRow {
        id: request.id().into_inner(),
        title: request.title().as_str().to_owned(),
        description: request.description().to_owned(),
        requested_date: request.requested_date(),
        status: request.status().as_str().to_owned(),
        worker_id: request.requester_id().into_inner(),
        tool_id: request.tool_id().map(ToolId::into_inner),
        updated_at: request.updated_at(),
    }
}

/// Reconstructs a domain [`JobRequest`] from a stored row.
///
/// The `worker_id` column holds the requester; the rename happened after the
/// column shipped, so the mapping lives here rather than in a migration.
pub(crate) fn row_to_request(row: RequestRow) -> WorkshopStoreResult<JobRequest> {
    let RequestRow {
        id,
        title: persisted_title,
        description,
        requested_date,
        status: persisted_status,
        worker_id,
        tool_id,
        updated_at,
    } = row;

    let title = Title::new(persisted_title).map_err(WorkshopStoreError::invalid_persisted_data)?;
    let status = RequestStatus::try_from(persisted_status.as_str())
        .map_err(WorkshopStoreError::invalid_persisted_data)?;

    Ok(JobRequest::from_persisted(PersistedRequestData {
        id: RequestId::from_uuid(id),
        title,
        description,
        requested_date,
        status,
        requester_id: UserId::from_uuid(worker_id),
        tool_id: tool_id.map(ToolId::from_uuid),
        updated_at,
    }))
}
