//! Adapter implementations of the workshop persistence port.

pub mod memory;
pub mod postgres;
