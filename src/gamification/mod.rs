//! Points, levels and streaks derived from task completions.
//!
//! A single process-wide [`domain::GamificationState`] record is read
//! lazily (a default record when none is stored), updated once per
//! completion by [`domain::record_completion`] and written back. The
//! record is passed explicitly; nothing here keeps a hidden copy.

pub mod adapters;
pub mod domain;
pub mod ports;
