//! Job request submission and decision pairing.

use crate::workshop::harness::{TestResult, WorkshopTestHarness, harness, runtime};
use rstest::rstest;
use tokio::runtime::Runtime;
use toolcrib::domain::{RequestStatus, Role, TaskPriority, TaskStatus, ToolStatus};
use toolcrib::services::{
    ConflictCause, JobRequestSubmission, LifecycleError, NewTool, RequestDecision,
};

#[rstest]
fn an_approved_request_becomes_a_task_for_the_requester(
    runtime: TestResult<Runtime>,
    harness: WorkshopTestHarness,
) {
    let runtime_handle = runtime.expect("runtime");
    runtime_handle.block_on(async {
        let owner = harness
            .register("norah", Role::Owner)
            .await
            .expect("register owner");
        let worker = harness
            .register("magnus", Role::Worker)
            .await
            .expect("register worker");
        let tool = harness
            .lifecycle
            .add_tool(owner, NewTool::new("Bandsaw"))
            .await
            .expect("add tool");

        let request = harness
            .lifecycle
            .submit_job_request(
                worker,
                JobRequestSubmission::new("Change the blade", "Current blade wanders")
                    .with_tool(tool.id()),
            )
            .await
            .expect("submit request");
        assert_eq!(request.status(), RequestStatus::Pending);

        let processed = harness
            .lifecycle
            .process_job_request(
                owner,
                request.id(),
                RequestDecision::Approve {
                    priority: TaskPriority::High,
                },
            )
            .await
            .expect("approve request");

        assert_eq!(processed.request.status(), RequestStatus::Approved);
        let task = processed.task.expect("approval should create a task");
        assert_eq!(task.title().as_str(), "Worker request: Change the blade");
        assert_eq!(task.description(), Some("Current blade wanders"));
        assert_eq!(task.worker_id(), worker.user_id());
        assert_eq!(task.tool_id(), Some(tool.id()));
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(
            harness.tool_status(tool.id()).await.expect("status"),
            ToolStatus::InUse,
            "the created task should hold the tool"
        );

        let pending = harness
            .overview
            .requests_by_status(owner, RequestStatus::Pending)
            .await
            .expect("pending listing");
        assert!(pending.is_empty());
    });
}

#[rstest]
fn a_declined_request_leaves_no_task_behind(
    runtime: TestResult<Runtime>,
    harness: WorkshopTestHarness,
) {
    let runtime_handle = runtime.expect("runtime");
    runtime_handle.block_on(async {
        let owner = harness
            .register("norah", Role::Owner)
            .await
            .expect("register owner");
        let worker = harness
            .register("magnus", Role::Worker)
            .await
            .expect("register worker");

        let request = harness
            .lifecycle
            .submit_job_request(
                worker,
                JobRequestSubmission::new("Buy a lathe", "We keep outsourcing turned parts"),
            )
            .await
            .expect("submit request");

        let processed = harness
            .lifecycle
            .process_job_request(owner, request.id(), RequestDecision::Decline)
            .await
            .expect("decline request");

        assert_eq!(processed.request.status(), RequestStatus::Declined);
        assert!(processed.task.is_none());

        let tasks = harness
            .overview
            .list_tasks(owner)
            .await
            .expect("list tasks");
        assert!(tasks.is_empty());
    });
}

#[rstest]
fn a_request_is_decided_exactly_once(
    runtime: TestResult<Runtime>,
    harness: WorkshopTestHarness,
) {
    let runtime_handle = runtime.expect("runtime");
    runtime_handle.block_on(async {
        let owner = harness
            .register("norah", Role::Owner)
            .await
            .expect("register owner");
        let worker = harness
            .register("magnus", Role::Worker)
            .await
            .expect("register worker");
        let request = harness
            .lifecycle
            .submit_job_request(
                worker,
                JobRequestSubmission::new("Restock sanding discs", "The 120 grit discs ran out"),
            )
            .await
            .expect("submit request");

        harness
            .lifecycle
            .process_job_request(
                owner,
                request.id(),
                RequestDecision::Approve {
                    priority: TaskPriority::Low,
                },
            )
            .await
            .expect("first decision");

        let second = harness
            .lifecycle
            .process_job_request(owner, request.id(), RequestDecision::Decline)
            .await;

        assert!(
            matches!(
                second,
                Err(LifecycleError::Conflict(
                    ConflictCause::RequestAlreadyDecided { ref status, .. }
                )) if status == "approved"
            ),
            "a decided request should reject a second decision"
        );

        let tasks = harness
            .overview
            .list_tasks(owner)
            .await
            .expect("list tasks");
        assert_eq!(tasks.len(), 1, "the rejected decision should change nothing");
    });
}

#[rstest]
fn worker_dashboards_track_request_outcomes(
    runtime: TestResult<Runtime>,
    harness: WorkshopTestHarness,
) {
    let runtime_handle = runtime.expect("runtime");
    runtime_handle.block_on(async {
        let owner = harness
            .register("norah", Role::Owner)
            .await
            .expect("register owner");
        let worker = harness
            .register("magnus", Role::Worker)
            .await
            .expect("register worker");
        let request = harness
            .lifecycle
            .submit_job_request(
                worker,
                JobRequestSubmission::new("Restock sanding discs", "The 120 grit discs ran out"),
            )
            .await
            .expect("submit request");

        let before = harness
            .overview
            .worker_overview(worker)
            .await
            .expect("summary before decision");
        assert_eq!(before.pending_requests, 1);
        assert_eq!(before.tasks.pending, 0);

        harness
            .lifecycle
            .process_job_request(
                owner,
                request.id(),
                RequestDecision::Approve {
                    priority: TaskPriority::Medium,
                },
            )
            .await
            .expect("approve request");

        let after = harness
            .overview
            .worker_overview(worker)
            .await
            .expect("summary after decision");
        assert_eq!(after.pending_requests, 0);
        assert_eq!(
            after.tasks.pending, 1,
            "the approval should hand the worker a pending task"
        );
    });
}
