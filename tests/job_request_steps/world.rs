//! Shared world state for job request BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use toolcrib::adapters::memory::InMemoryWorkshopStore;
use toolcrib::domain::{Actor, EmailAddress, JobRequest, PasswordHash, Role, User, Username};
use toolcrib::services::{LifecycleError, LifecycleService, ProcessedRequest};

/// Service type used by the BDD world.
pub type TestLifecycleService = LifecycleService<InMemoryWorkshopStore, DefaultClock>;

/// Structurally valid PHC string for seeded accounts; scenarios never log in.
const SEED_PHC: &str =
    "$argon2id$v=19$m=65536,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Scenario world for job request behaviour tests.
pub struct JobRequestWorld {
    pub store: Arc<InMemoryWorkshopStore>,
    pub lifecycle: TestLifecycleService,
    pub owner: Option<Actor>,
    pub worker: Option<Actor>,
    pub request: Option<JobRequest>,
    pub last_decision: Option<Result<ProcessedRequest, LifecycleError>>,
}

impl JobRequestWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryWorkshopStore::new());
        let lifecycle = LifecycleService::new(Arc::clone(&store), Arc::new(DefaultClock));

        Self {
            store,
            lifecycle,
            owner: None,
            worker: None,
            request: None,
            last_decision: None,
        }
    }
}

impl Default for JobRequestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> JobRequestWorld {
    JobRequestWorld::default()
}

/// Builds an account record for direct store seeding.
///
/// # Errors
///
/// Returns an error when the username or derived email fails validation.
pub fn seed_user(username: &str, role: Role) -> Result<User, eyre::Report> {
    let user = User::new(
        Username::new(username)?,
        EmailAddress::new(format!("{username}@workshop.example"))?,
        PasswordHash::from_phc_string(SEED_PHC)?,
        role,
        &DefaultClock,
    );
    Ok(user)
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
