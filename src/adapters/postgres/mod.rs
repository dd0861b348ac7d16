//! `PostgreSQL` adapter for workshop persistence.

pub(crate) mod models;
mod schema;
mod store;

pub use store::{PostgresWorkshopStore, WorkshopPgPool};
pub(crate) use store::{row_to_issue, row_to_request, row_to_task, row_to_tool, row_to_user};
