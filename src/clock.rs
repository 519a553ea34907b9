//! Clock capability
//!
//! Window computation needs "now"; injecting it keeps evaluation
//! deterministic under test instead of reading the system clock inline.

use chrono::{Local, NaiveDateTime};

/// Source of the current local time
pub trait Clock {
    /// The current local date and time
    fn now(&self) -> NaiveDateTime;
}

/// The real system clock, in local time
///
/// Budget windows follow the user's wall clock, so local time (not UTC) is
/// what "start of the month" is computed from.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to one instant, for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    /// Create a clock that always reports `instant`
    pub fn new(instant: NaiveDateTime) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
