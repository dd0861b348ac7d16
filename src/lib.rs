//! Toolcrib: workshop tool and task lifecycle management.
//!
//! This crate provides the core functionality for running a small workshop's
//! tool crib: owners register tools and assign maintenance tasks, workers
//! progress tasks, report tool issues, and request jobs, while tool
//! availability is kept consistent with the work recorded against each tool.
//!
//! # Architecture
//!
//! Toolcrib follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//! - **Services**: Orchestration entry points for the presentation layer
//!
//! # Modules
//!
//! - [`domain`]: Aggregates, value objects, and lifecycle state machines
//! - [`ports`]: The persistence store contract
//! - [`adapters`]: In-memory and Diesel-backed store implementations
//! - [`services`]: Account, lifecycle, and overview services

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
