//! Then steps for job request BDD scenarios.

use super::world::{JobRequestWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use toolcrib::domain::{JobRequest, RequestStatus};
use toolcrib::ports::WorkshopStore;
use toolcrib::services::{ConflictCause, LifecycleError};

#[then(r#"the request status is "{status}""#)]
fn request_status_is(world: &JobRequestWorld, status: String) -> Result<(), eyre::Report> {
    let expected_status = RequestStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let request_id = world
        .request
        .as_ref()
        .map(JobRequest::id)
        .ok_or_else(|| eyre::eyre!("missing request in scenario world"))?;
    let stored = run_async(world.store.find_request(request_id))
        .wrap_err("find request")?
        .ok_or_else(|| eyre::eyre!("request should exist"))?;

    if stored.status() != expected_status {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected_status.as_str(),
            stored.status().as_str()
        ));
    }

    Ok(())
}

#[then(r#"a task titled "{title}" is assigned to the worker"#)]
fn task_assigned_to_worker(world: &JobRequestWorld, title: String) -> Result<(), eyre::Report> {
    let worker = world
        .worker
        .ok_or_else(|| eyre::eyre!("missing worker in scenario world"))?;
    let decision = world
        .last_decision
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing decision result"))?;
    let processed = decision
        .as_ref()
        .map_err(|err| eyre::eyre!("decision should succeed, got {err:?}"))?;

    let task = processed
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("approval should create a task"))?;
    if task.title().as_str() != title {
        return Err(eyre::eyre!(
            "expected task title {title:?}, found {:?}",
            task.title().as_str()
        ));
    }
    if task.worker_id() != worker.user_id() {
        return Err(eyre::eyre!("the task should be assigned to the requester"));
    }

    let stored = run_async(world.store.find_task(task.id())).wrap_err("find task")?;
    if stored.as_ref() != Some(task) {
        return Err(eyre::eyre!("the created task should be stored"));
    }

    Ok(())
}

#[then("no task is created")]
fn no_task_created(world: &JobRequestWorld) -> Result<(), eyre::Report> {
    let decision = world
        .last_decision
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing decision result"))?;
    let processed = decision
        .as_ref()
        .map_err(|err| eyre::eyre!("decision should succeed, got {err:?}"))?;

    if processed.task.is_some() {
        return Err(eyre::eyre!("a declined request should not create a task"));
    }

    let tasks = run_async(world.store.list_tasks()).wrap_err("list tasks")?;
    if !tasks.is_empty() {
        return Err(eyre::eyre!("the store should hold no tasks"));
    }

    Ok(())
}

#[then("the decision fails because the request was already decided")]
fn decision_fails_as_already_decided(world: &JobRequestWorld) -> Result<(), eyre::Report> {
    let decision = world
        .last_decision
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing decision result"))?;

    if !matches!(
        decision,
        Err(LifecycleError::Conflict(
            ConflictCause::RequestAlreadyDecided { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected an already-decided conflict, got {decision:?}"
        ));
    }

    Ok(())
}
