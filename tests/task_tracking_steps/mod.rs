//! Step definitions for task tracking scenarios.

pub mod world;
