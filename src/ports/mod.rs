//! Port contracts for workshop persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the services.

pub mod store;

pub use store::{ToolCascade, WorkshopStore, WorkshopStoreError, WorkshopStoreResult};
