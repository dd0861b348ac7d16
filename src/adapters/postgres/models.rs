//! Diesel row models for workshop persistence.

use super::schema::{job_requests, tasks, tool_issues, tools, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for account records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal account identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Unique login name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub username: String,
    /// Unique contact address.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub email: String,
    /// Argon2id credential hash.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub password_hash: String,
    /// Account role.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub role: String,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
}

/// Insert model for account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Internal account identifier.
    pub id: uuid::Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique contact address.
    pub email: String,
    /// Argon2id credential hash.
    pub password_hash: String,
    /// Account role.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for tool records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tools)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ToolRow {
    /// Internal tool identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Tool name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// Optional free-form description.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub description: Option<String>,
    /// Availability status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Latest recorded maintenance date.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub last_maintenance: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for tool records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tools)]
pub struct NewToolRow {
    /// Internal tool identifier.
    pub id: uuid::Uuid,
    /// Tool name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Availability status.
    pub status: String,
    /// Latest recorded maintenance date.
    pub last_maintenance: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Task title.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub title: String,
    /// Optional free-form description.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub description: Option<String>,
    /// Urgency.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub priority: String,
    /// Lifecycle status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Assignment timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub assigned_date: DateTime<Utc>,
    /// Completion timestamp, if completed.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub completed_date: Option<DateTime<Utc>>,
    /// Assigned worker.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub worker_id: uuid::Uuid,
    /// Referenced tool, if any.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub tool_id: Option<uuid::Uuid>,
    /// Last lifecycle timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Urgency.
    pub priority: String,
    /// Lifecycle status.
    pub status: String,
    /// Assignment timestamp.
    pub assigned_date: DateTime<Utc>,
    /// Completion timestamp, if completed.
    pub completed_date: Option<DateTime<Utc>>,
    /// Assigned worker.
    pub worker_id: uuid::Uuid,
    /// Referenced tool, if any.
    pub tool_id: Option<uuid::Uuid>,
    /// Last lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for issue records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tool_issues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IssueRow {
    /// Internal issue identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Issue title.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub title: String,
    /// Problem description.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub description: String,
    /// Report timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub reported_date: DateTime<Utc>,
    /// Lifecycle status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Reporting worker.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub reporter_id: uuid::Uuid,
    /// Affected tool.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub tool_id: uuid::Uuid,
    /// Last lifecycle timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for issue records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tool_issues)]
pub struct NewIssueRow {
    /// Internal issue identifier.
    pub id: uuid::Uuid,
    /// Issue title.
    pub title: String,
    /// Problem description.
    pub description: String,
    /// Report timestamp.
    pub reported_date: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Reporting worker.
    pub reporter_id: uuid::Uuid,
    /// Affected tool.
    pub tool_id: uuid::Uuid,
    /// Last lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for job request records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = job_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RequestRow {
    /// Internal request identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Request title.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub title: String,
    /// Work description.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub description: String,
    /// Submission timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub requested_date: DateTime<Utc>,
    /// Decision status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Requesting worker (historical column name).
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub worker_id: uuid::Uuid,
    /// Requested tool, if any.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub tool_id: Option<uuid::Uuid>,
    /// Last lifecycle timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for job request records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = job_requests)]
pub struct NewRequestRow {
    /// Internal request identifier.
    pub id: uuid::Uuid,
    /// Request title.
    pub title: String,
    /// Work description.
    pub description: String,
    /// Submission timestamp.
    pub requested_date: DateTime<Utc>,
    /// Decision status.
    pub status: String,
    /// Requesting worker (historical column name).
    pub worker_id: uuid::Uuid,
    /// Requested tool, if any.
    pub tool_id: Option<uuid::Uuid>,
    /// Last lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}
