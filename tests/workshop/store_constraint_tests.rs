//! Duplicate and reference checks in the in-memory store.

use crate::workshop::harness::{TestResult, WorkshopTestHarness, harness, runtime, seed_tool, seed_user};
use mockable::DefaultClock;
use rstest::rstest;
use tokio::runtime::Runtime;
use toolcrib::domain::{EntityRef, Role, Task, TaskPriority, Title, ToolId, ToolIssue, UserId};
use toolcrib::ports::{WorkshopStore, WorkshopStoreError};

#[rstest]
fn a_user_id_is_stored_once(runtime: TestResult<Runtime>, harness: WorkshopTestHarness) {
    let runtime_handle = runtime.expect("runtime");
    runtime_handle.block_on(async {
        let user = seed_user("magnus", "magnus@workshop.example", Role::Worker)
            .expect("seed user");
        harness.store.insert_user(&user).await.expect("first insert");

        let result = harness.store.insert_user(&user).await;

        assert!(
            matches!(
                result,
                Err(WorkshopStoreError::Duplicate(EntityRef::User(id))) if id == user.id()
            ),
            "should reject the duplicate user id"
        );
    });
}

#[rstest]
fn a_username_is_unique_across_users(
    runtime: TestResult<Runtime>,
    harness: WorkshopTestHarness,
) {
    let runtime_handle = runtime.expect("runtime");
    runtime_handle.block_on(async {
        let first = seed_user("magnus", "magnus@workshop.example", Role::Worker)
            .expect("seed first user");
        harness.store.insert_user(&first).await.expect("first insert");

        let second = seed_user("magnus", "other@workshop.example", Role::Worker)
            .expect("seed second user");
        let result = harness.store.insert_user(&second).await;

        assert!(
            matches!(
                result,
                Err(WorkshopStoreError::UsernameTaken(ref username))
                    if username.as_str() == "magnus"
            ),
            "should reject the reused username"
        );
    });
}

#[rstest]
fn an_email_is_unique_across_users(
    runtime: TestResult<Runtime>,
    harness: WorkshopTestHarness,
) {
    let runtime_handle = runtime.expect("runtime");
    runtime_handle.block_on(async {
        let first = seed_user("magnus", "shared@workshop.example", Role::Worker)
            .expect("seed first user");
        harness.store.insert_user(&first).await.expect("first insert");

        let second = seed_user("petra", "shared@workshop.example", Role::Worker)
            .expect("seed second user");
        let result = harness.store.insert_user(&second).await;

        assert!(
            matches!(
                result,
                Err(WorkshopStoreError::EmailTaken(ref email))
                    if email.as_str() == "shared@workshop.example"
            ),
            "should reject the reused email"
        );
    });
}

#[rstest]
fn tasks_reference_a_known_worker(
    runtime: TestResult<Runtime>,
    harness: WorkshopTestHarness,
) {
    let runtime_handle = runtime.expect("runtime");
    runtime_handle.block_on(async {
        let unknown_worker = UserId::new();
        let task = Task::new(
            Title::new("Sharpen chisels").expect("title"),
            None,
            TaskPriority::Low,
            unknown_worker,
            None,
            &DefaultClock,
        );

        let result = harness.store.insert_task(&task).await;

        assert!(
            matches!(
                result,
                Err(WorkshopStoreError::Missing(EntityRef::User(id))) if id == unknown_worker
            ),
            "should reject the unknown worker reference"
        );
    });
}

#[rstest]
fn issues_reference_a_known_tool(
    runtime: TestResult<Runtime>,
    harness: WorkshopTestHarness,
) {
    let runtime_handle = runtime.expect("runtime");
    runtime_handle.block_on(async {
        let reporter = seed_user("magnus", "magnus@workshop.example", Role::Worker)
            .expect("seed reporter");
        harness
            .store
            .insert_user(&reporter)
            .await
            .expect("insert reporter");

        let unknown_tool = ToolId::new();
        let issue = ToolIssue::new(
            Title::new("Frayed cable").expect("title"),
            "Insulation is cracked",
            reporter.id(),
            unknown_tool,
            &DefaultClock,
        )
        .expect("issue");

        let result = harness.store.insert_issue(&issue).await;

        assert!(
            matches!(
                result,
                Err(WorkshopStoreError::Missing(EntityRef::Tool(id))) if id == unknown_tool
            ),
            "should reject the unknown tool reference"
        );
    });
}

#[rstest]
fn updates_require_a_stored_record(
    runtime: TestResult<Runtime>,
    harness: WorkshopTestHarness,
) {
    let runtime_handle = runtime.expect("runtime");
    runtime_handle.block_on(async {
        let tool = seed_tool("Bandsaw").expect("seed tool");

        let result = harness.store.update_tool(&tool).await;

        assert!(
            matches!(
                result,
                Err(WorkshopStoreError::Missing(EntityRef::Tool(id))) if id == tool.id()
            ),
            "should reject the update of a record never stored"
        );
    });
}
