//! Then steps for tool status BDD scenarios.

use super::world::{ToolStatusWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use toolcrib::domain::{Tool, ToolStatus};
use toolcrib::ports::WorkshopStore;

#[then(r#"the tool status is "{status}""#)]
fn tool_status_is(world: &ToolStatusWorld, status: String) -> Result<(), eyre::Report> {
    let expected_status = ToolStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let tool_id = world
        .tool
        .as_ref()
        .map(Tool::id)
        .ok_or_else(|| eyre::eyre!("missing tool in scenario world"))?;
    let stored = run_async(world.store.find_tool(tool_id))
        .wrap_err("find tool")?
        .ok_or_else(|| eyre::eyre!("tool should exist"))?;

    if stored.status() != expected_status {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected_status.as_str(),
            stored.status().as_str()
        ));
    }

    Ok(())
}
