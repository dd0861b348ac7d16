//! Derived tool status across the task and issue lifecycles.

use crate::workshop::harness::{TestResult, WorkshopTestHarness, harness, runtime};
use rstest::rstest;
use tokio::runtime::Runtime;
use toolcrib::domain::{IssueStatus, Role, TaskPriority, TaskStatus, ToolStatus};
use toolcrib::services::{IssueReport, NewTool, TaskAssignment, ToolUpdate};

#[rstest]
fn tool_status_follows_the_work_against_it(
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
        assert_eq!(tool.status(), ToolStatus::Available);

        let task = harness
            .lifecycle
            .assign_task(
                owner,
                TaskAssignment::new("Change the blade", TaskPriority::High, worker.user_id())
                    .with_tool(tool.id()),
            )
            .await
            .expect("assign task");
        assert_eq!(
            harness.tool_status(tool.id()).await.expect("status"),
            ToolStatus::InUse
        );

        let issue = harness
            .lifecycle
            .report_issue(
                worker,
                IssueReport::new("Frayed cable", "Insulation is cracked", tool.id()),
            )
            .await
            .expect("report issue");
        assert_eq!(
            harness.tool_status(tool.id()).await.expect("status"),
            ToolStatus::Maintenance
        );

        harness
            .lifecycle
            .update_issue_status(owner, issue.id(), IssueStatus::Resolved)
            .await
            .expect("resolve issue");
        assert_eq!(
            harness.tool_status(tool.id()).await.expect("status"),
            ToolStatus::InUse
        );

        harness
            .lifecycle
            .update_task_status(worker, task.id(), TaskStatus::Completed)
            .await
            .expect("complete task");
        assert_eq!(
            harness.tool_status(tool.id()).await.expect("status"),
            ToolStatus::Available
        );
    });
}

#[rstest]
fn a_tool_stays_in_use_while_any_task_remains_active(
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

        let first = harness
            .lifecycle
            .assign_task(
                owner,
                TaskAssignment::new("Change the blade", TaskPriority::High, worker.user_id())
                    .with_tool(tool.id()),
            )
            .await
            .expect("assign first task");
        let second = harness
            .lifecycle
            .assign_task(
                owner,
                TaskAssignment::new("Square the fence", TaskPriority::Low, worker.user_id())
                    .with_tool(tool.id()),
            )
            .await
            .expect("assign second task");

        harness
            .lifecycle
            .update_task_status(worker, first.id(), TaskStatus::Completed)
            .await
            .expect("complete first task");
        assert_eq!(
            harness.tool_status(tool.id()).await.expect("status"),
            ToolStatus::InUse,
            "one active task should keep the tool in use"
        );

        harness
            .lifecycle
            .update_task_status(worker, second.id(), TaskStatus::Completed)
            .await
            .expect("complete second task");
        assert_eq!(
            harness.tool_status(tool.id()).await.expect("status"),
            ToolStatus::Available
        );
    });
}

#[rstest]
fn a_manual_status_edit_stands_until_the_next_recomputation(
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

        harness
            .lifecycle
            .edit_tool(
                owner,
                tool.id(),
                ToolUpdate::new("Bandsaw", ToolStatus::Maintenance),
            )
            .await
            .expect("edit tool");
        assert_eq!(
            harness.tool_status(tool.id()).await.expect("status"),
            ToolStatus::Maintenance,
            "the manual status should stand while nothing recomputes it"
        );

        harness
            .lifecycle
            .assign_task(
                owner,
                TaskAssignment::new("Change the blade", TaskPriority::High, worker.user_id())
                    .with_tool(tool.id()),
            )
            .await
            .expect("assign task");
        assert_eq!(
            harness.tool_status(tool.id()).await.expect("status"),
            ToolStatus::InUse,
            "the recomputation should supersede the manual status"
        );
    });
}

#[rstest]
fn deleting_a_tool_removes_every_dependent_record(
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

        harness
            .lifecycle
            .assign_task(
                owner,
                TaskAssignment::new("Change the blade", TaskPriority::High, worker.user_id())
                    .with_tool(tool.id()),
            )
            .await
            .expect("assign task");
        harness
            .lifecycle
            .report_issue(
                worker,
                IssueReport::new("Frayed cable", "Insulation is cracked", tool.id()),
            )
            .await
            .expect("report issue");

        let cascade = harness
            .lifecycle
            .delete_tool(owner, tool.id())
            .await
            .expect("delete tool");

        assert_eq!(cascade.tasks_removed, 1);
        assert_eq!(cascade.issues_removed, 1);
        assert_eq!(cascade.requests_removed, 0);

        let tools = harness.overview.list_tools().await.expect("list tools");
        assert!(tools.is_empty());
        let tasks = harness
            .overview
            .list_tasks(owner)
            .await
            .expect("list tasks");
        assert!(tasks.is_empty());
        let issues = harness
            .overview
            .list_issues(owner)
            .await
            .expect("list issues");
        assert!(issues.is_empty());
    });
}
