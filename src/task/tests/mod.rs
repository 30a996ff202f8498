//! Unit tests for the task module.


use crate::test_support::{ManualClock, at, date};
