//! When steps for tool status BDD scenarios.

use super::world::{ToolStatusWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use toolcrib::domain::{IssueStatus, Task, TaskPriority, TaskStatus, Tool, ToolIssue};
use toolcrib::services::{IssueReport, TaskAssignment};

#[when(r#"the owner assigns a "{priority}" priority task "{title}" using the tool"#)]
fn assign_task(
    world: &mut ToolStatusWorld,
    priority: String,
    title: String,
) -> Result<(), eyre::Report> {
    let owner = world
        .owner
        .ok_or_else(|| eyre::eyre!("missing owner in scenario world"))?;
    let worker = world
        .worker
        .ok_or_else(|| eyre::eyre!("missing worker in scenario world"))?;
    let tool_id = world
        .tool
        .as_ref()
        .map(Tool::id)
        .ok_or_else(|| eyre::eyre!("missing tool in scenario world"))?;
    let parsed_priority = TaskPriority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;

    let task = run_async(world.lifecycle.assign_task(
        owner,
        TaskAssignment::new(title, parsed_priority, worker.user_id()).with_tool(tool_id),
    ))
    .wrap_err("assign task")?;
    world.task = Some(task);
    Ok(())
}

#[when(r#"the worker reports "{title}" described "{description}" against the tool"#)]
fn report_issue(
    world: &mut ToolStatusWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let worker = world
        .worker
        .ok_or_else(|| eyre::eyre!("missing worker in scenario world"))?;
    let tool_id = world
        .tool
        .as_ref()
        .map(Tool::id)
        .ok_or_else(|| eyre::eyre!("missing tool in scenario world"))?;

    let issue = run_async(
        world
            .lifecycle
            .report_issue(worker, IssueReport::new(title, description, tool_id)),
    )
    .wrap_err("report issue")?;
    world.issue = Some(issue);
    Ok(())
}

#[when("the owner resolves the issue")]
fn resolve_issue(world: &mut ToolStatusWorld) -> Result<(), eyre::Report> {
    let owner = world
        .owner
        .ok_or_else(|| eyre::eyre!("missing owner in scenario world"))?;
    let issue_id = world
        .issue
        .as_ref()
        .map(ToolIssue::id)
        .ok_or_else(|| eyre::eyre!("missing issue in scenario world"))?;

    let resolved = run_async(
        world
            .lifecycle
            .update_issue_status(owner, issue_id, IssueStatus::Resolved),
    )
    .wrap_err("resolve issue")?;
    world.issue = Some(resolved);
    Ok(())
}

#[when("the worker completes the task")]
fn complete_task(world: &mut ToolStatusWorld) -> Result<(), eyre::Report> {
    let worker = world
        .worker
        .ok_or_else(|| eyre::eyre!("missing worker in scenario world"))?;
    let task_id = world
        .task
        .as_ref()
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let completed = run_async(
        world
            .lifecycle
            .update_task_status(worker, task_id, TaskStatus::Completed),
    )
    .wrap_err("complete task")?;
    world.task = Some(completed);
    Ok(())
}
