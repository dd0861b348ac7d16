//! Shared world state for tool status BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use toolcrib::adapters::memory::InMemoryWorkshopStore;
use toolcrib::domain::{
    Actor, EmailAddress, PasswordHash, Role, Task, Tool, ToolIssue, User, Username,
};
use toolcrib::services::LifecycleService;

/// Service type used by the BDD world.
pub type TestLifecycleService = LifecycleService<InMemoryWorkshopStore, DefaultClock>;

/// Structurally valid PHC string for seeded accounts; scenarios never log in.
const SEED_PHC: &str =
    "$argon2id$v=19$m=65536,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Scenario world for tool status behaviour tests.
pub struct ToolStatusWorld {
    pub store: Arc<InMemoryWorkshopStore>,
    pub lifecycle: TestLifecycleService,
    pub owner: Option<Actor>,
    pub worker: Option<Actor>,
    pub tool: Option<Tool>,
    pub task: Option<Task>,
    pub issue: Option<ToolIssue>,
}

impl ToolStatusWorld {
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
            tool: None,
            task: None,
            issue: None,
        }
    }
}

impl Default for ToolStatusWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ToolStatusWorld {
    ToolStatusWorld::default()
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
