//! Step definitions for job request behaviour tests.

pub mod world;

mod given;
mod then;
mod when;
