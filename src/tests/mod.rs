//! Unit tests for the workshop crate.
//!
//! Tests are organised by concern: validated value objects, lifecycle state
//! machines, row-to-domain conversions for the `PostgreSQL` adapter, and the
//! service layer exercised against the in-memory store.
