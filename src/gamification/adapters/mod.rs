//! Adapter implementations for gamification ports.

pub mod memory;
pub mod sqlite;
