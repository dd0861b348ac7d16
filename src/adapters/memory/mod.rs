//! In-memory adapter for the workshop store port.

mod store;

pub use store::InMemoryWorkshopStore;
