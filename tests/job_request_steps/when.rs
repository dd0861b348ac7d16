//! When steps for job request BDD scenarios.

use super::world::{JobRequestWorld, run_async};
use rstest_bdd_macros::when;
use toolcrib::domain::{JobRequest, TaskPriority};
use toolcrib::services::RequestDecision;

#[when(r#"the owner approves the request at "{priority}" priority"#)]
fn approve_request(world: &mut JobRequestWorld, priority: String) -> Result<(), eyre::Report> {
    let owner = world
        .owner
        .ok_or_else(|| eyre::eyre!("missing owner in scenario world"))?;
    let request_id = world
        .request
        .as_ref()
        .map(JobRequest::id)
        .ok_or_else(|| eyre::eyre!("missing request in scenario world"))?;
    let parsed_priority = TaskPriority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;

    let result = run_async(world.lifecycle.process_job_request(
        owner,
        request_id,
        RequestDecision::Approve {
            priority: parsed_priority,
        },
    ));
    world.last_decision = Some(result);
    Ok(())
}

#[when("the owner declines the request")]
fn decline_request(world: &mut JobRequestWorld) -> Result<(), eyre::Report> {
    let owner = world
        .owner
        .ok_or_else(|| eyre::eyre!("missing owner in scenario world"))?;
    let request_id = world
        .request
        .as_ref()
        .map(JobRequest::id)
        .ok_or_else(|| eyre::eyre!("missing request in scenario world"))?;

    let result = run_async(
        world
            .lifecycle
            .process_job_request(owner, request_id, RequestDecision::Decline),
    );
    world.last_decision = Some(result);
    Ok(())
}
