//! Done: a gamified personal task queue.
//!
//! Tasks are kept in a strict, user-controlled order. Completing one moves
//! it to a permanent log and credits points, levels and daily streaks.
//!
//! # Architecture
//!
//! Done follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `SQLite` implementations of those ports
//!
//! # Modules
//!
//! - [`task`]: Body normalization, deadlines, ordering and the task lifecycle
//! - [`gamification`]: Points, levels and streaks
//! - [`storage`]: `SQLite` connection pool and schema
//! - [`config`]: Runtime configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod gamification;
pub mod storage;
pub mod task;
pub mod telemetry;
