//! Step definitions for tool status behaviour tests.

pub mod world;

mod given;
mod then;
mod when;
