//! Given steps for job request BDD scenarios.

use super::world::{JobRequestWorld, run_async, seed_user};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use toolcrib::domain::{Actor, JobRequest, Role};
use toolcrib::ports::WorkshopStore;
use toolcrib::services::{JobRequestSubmission, RequestDecision};

#[given("an owner and a worker are registered")]
fn owner_and_worker_registered(world: &mut JobRequestWorld) -> Result<(), eyre::Report> {
    let owner_account = seed_user("norah", Role::Owner)?;
    run_async(world.store.insert_user(&owner_account)).wrap_err("insert owner")?;
    world.owner = Some(Actor::new(owner_account.id(), owner_account.role()));

    let worker_account = seed_user("magnus", Role::Worker)?;
    run_async(world.store.insert_user(&worker_account)).wrap_err("insert worker")?;
    world.worker = Some(Actor::new(worker_account.id(), worker_account.role()));
    Ok(())
}

#[given(r#"the worker has requested "{title}" described "{description}""#)]
fn worker_has_requested(
    world: &mut JobRequestWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let worker = world
        .worker
        .ok_or_else(|| eyre::eyre!("missing worker in scenario world"))?;

    let request = run_async(
        world
            .lifecycle
            .submit_job_request(worker, JobRequestSubmission::new(title, description)),
    )
    .wrap_err("submit request in scenario setup")?;
    world.request = Some(request);
    Ok(())
}

#[given("the request has been declined")]
fn request_already_declined(world: &mut JobRequestWorld) -> Result<(), eyre::Report> {
    let owner = world
        .owner
        .ok_or_else(|| eyre::eyre!("missing owner in scenario world"))?;
    let request_id = world
        .request
        .as_ref()
        .map(JobRequest::id)
        .ok_or_else(|| eyre::eyre!("missing request in scenario world"))?;

    run_async(
        world
            .lifecycle
            .process_job_request(owner, request_id, RequestDecision::Decline),
    )
    .wrap_err("decline request in scenario setup")?;
    Ok(())
}
