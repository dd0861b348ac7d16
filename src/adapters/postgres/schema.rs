//! Diesel schema for workshop persistence.

diesel::table! {
    /// Registered account records.
    users (id) {
        /// Internal account identifier.
        id -> Uuid,
        /// Unique login name.
        #[max_length = 20]
        username -> Varchar,
        /// Unique contact address.
        #[max_length = 120]
        email -> Varchar,
        /// Argon2id credential hash in PHC string format.
        #[max_length = 128]
        password_hash -> Varchar,
        /// Account role (owner or worker).
        #[max_length = 10]
        role -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tool records with derived availability status.
    tools (id) {
        /// Internal tool identifier.
        id -> Uuid,
        /// Tool name.
        #[max_length = 100]
        name -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Availability status (available, in_use, or maintenance).
        #[max_length = 20]
        status -> Varchar,
        /// Latest recorded maintenance date.
        last_maintenance -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last edit timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records assigned to workers.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Urgency (low, medium, or high).
        #[max_length = 10]
        priority -> Varchar,
        /// Lifecycle status (pending, in_progress, or completed).
        #[max_length = 20]
        status -> Varchar,
        /// Assignment timestamp.
        assigned_date -> Timestamptz,
        /// Completion timestamp, set when the task completes.
        completed_date -> Nullable<Timestamptz>,
        /// Assigned worker.
        worker_id -> Uuid,
        /// Referenced tool, if any.
        tool_id -> Nullable<Uuid>,
        /// Last lifecycle timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tool issue records reported by workers.
    tool_issues (id) {
        /// Internal issue identifier.
        id -> Uuid,
        /// Issue title.
        #[max_length = 100]
        title -> Varchar,
        /// Problem description.
        description -> Text,
        /// Report timestamp.
        reported_date -> Timestamptz,
        /// Lifecycle status (reported, under_review, or resolved).
        #[max_length = 20]
        status -> Varchar,
        /// Reporting worker.
        reporter_id -> Uuid,
        /// Affected tool.
        tool_id -> Uuid,
        /// Last lifecycle timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job request records submitted by workers.
    ///
    /// The requester column keeps its historical name `worker_id` for
    /// compatibility with existing data.
    job_requests (id) {
        /// Internal request identifier.
        id -> Uuid,
        /// Request title.
        #[max_length = 100]
        title -> Varchar,
        /// Work description.
        description -> Text,
        /// Submission timestamp.
        requested_date -> Timestamptz,
        /// Decision status (pending, approved, or declined).
        #[max_length = 20]
        status -> Varchar,
        /// Requesting worker.
        worker_id -> Uuid,
        /// Requested tool, if any.
        tool_id -> Nullable<Uuid>,
        /// Last lifecycle timestamp.
        updated_at -> Timestamptz,
    }
}
