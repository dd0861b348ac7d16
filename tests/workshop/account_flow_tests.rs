//! Registration and login flows against the shared store.

use crate::workshop::harness::{TEST_PASSWORD, TestResult, WorkshopTestHarness, harness, runtime};
use rstest::rstest;
use tokio::runtime::Runtime;
use toolcrib::domain::Role;
use toolcrib::services::{ConflictCause, LifecycleError, NewAccount};

#[rstest]
fn registered_accounts_can_log_back_in(
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

        let owner_login = harness
            .accounts
            .authenticate("norah", TEST_PASSWORD)
            .await
            .expect("owner login");
        assert_eq!(owner_login.id(), owner.user_id());
        assert_eq!(owner_login.role(), Role::Owner);

        let worker_login = harness
            .accounts
            .authenticate("magnus", TEST_PASSWORD)
            .await
            .expect("worker login");
        assert_eq!(worker_login.id(), worker.user_id());
        assert_eq!(worker_login.role(), Role::Worker);
    });
}

#[rstest]
fn owners_see_registered_workers_only(
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

        let workers = harness
            .overview
            .list_workers(owner)
            .await
            .expect("list workers");

        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].id(), worker.user_id());
    });
}

#[rstest]
fn a_username_cannot_be_registered_twice(
    runtime: TestResult<Runtime>,
    harness: WorkshopTestHarness,
) {
    let runtime_handle = runtime.expect("runtime");
    runtime_handle.block_on(async {
        harness
            .register("magnus", Role::Worker)
            .await
            .expect("first registration");

        let result = harness
            .accounts
            .register(NewAccount::new(
                "magnus",
                "second@workshop.example",
                TEST_PASSWORD,
                Role::Owner,
            ))
            .await;

        assert!(
            matches!(
                result,
                Err(LifecycleError::Conflict(ConflictCause::UsernameTaken(
                    ref username
                ))) if username.as_str() == "magnus"
            ),
            "should reject the reused username"
        );
    });
}

#[rstest]
fn failed_logins_do_not_reveal_the_cause(
    runtime: TestResult<Runtime>,
    harness: WorkshopTestHarness,
) {
    let runtime_handle = runtime.expect("runtime");
    runtime_handle.block_on(async {
        harness
            .register("magnus", Role::Worker)
            .await
            .expect("register worker");

        let wrong_password = harness.accounts.authenticate("magnus", "guess").await;
        assert!(matches!(
            wrong_password,
            Err(LifecycleError::Authentication)
        ));

        let unknown_account = harness
            .accounts
            .authenticate("petra", TEST_PASSWORD)
            .await;
        assert!(matches!(
            unknown_account,
            Err(LifecycleError::Authentication)
        ));
    });
}
