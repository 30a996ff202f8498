//! Task queue management.
//!
//! Pending tasks form a strictly ordered queue: new tasks enter at the
//! front and can be dragged to any position. Completing a task moves it to
//! an append-only log and credits the gamification record. The module
//! follows hexagonal architecture:
//!
//! - Domain types and rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
