//! Task tracking: the collection, its remote store, and derived views.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types, deadline arithmetic and ordering in [`domain`]
//! - Port contracts for the remote store and the input surface in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
