//! Given steps for tool status BDD scenarios.

use super::world::{ToolStatusWorld, run_async, seed_user};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use toolcrib::domain::{Actor, Role, TaskPriority, Tool};
use toolcrib::ports::WorkshopStore;
use toolcrib::services::{IssueReport, NewTool, TaskAssignment};

#[given("an owner and a worker are registered")]
fn owner_and_worker_registered(world: &mut ToolStatusWorld) -> Result<(), eyre::Report> {
    let owner_account = seed_user("norah", Role::Owner)?;
    run_async(world.store.insert_user(&owner_account)).wrap_err("insert owner")?;
    world.owner = Some(Actor::new(owner_account.id(), owner_account.role()));

    let worker_account = seed_user("magnus", Role::Worker)?;
    run_async(world.store.insert_user(&worker_account)).wrap_err("insert worker")?;
    world.worker = Some(Actor::new(worker_account.id(), worker_account.role()));
    Ok(())
}

#[given(r#"the workshop has a tool "{name}""#)]
fn workshop_has_a_tool(world: &mut ToolStatusWorld, name: String) -> Result<(), eyre::Report> {
    let owner = world
        .owner
        .ok_or_else(|| eyre::eyre!("missing owner in scenario world"))?;

    let tool = run_async(world.lifecycle.add_tool(owner, NewTool::new(name)))
        .wrap_err("add tool in scenario setup")?;
    world.tool = Some(tool);
    Ok(())
}

#[given(r#"the owner has assigned a "{priority}" priority task "{title}" using the tool"#)]
fn task_already_assigned(
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
    .wrap_err("assign task in scenario setup")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"the worker has reported "{title}" described "{description}" against the tool"#)]
fn issue_already_reported(
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
    .wrap_err("report issue in scenario setup")?;
    world.issue = Some(issue);
    Ok(())
}
