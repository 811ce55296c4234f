//! Taskclock: personal task tracking with live deadline countdowns.
//!
//! This crate keeps an in-memory task collection consistent with a remote
//! store, derives the time left until each task's deadline, and produces
//! ordered views of the collection for a rendering layer.
//!
//! # Architecture
//!
//! Taskclock follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`config`]: Runtime settings
//! - [`task`]: Task collection, store synchronisation, and views

pub mod config;
pub mod task;
