//! # Clock
//!
//! Source of "now" for every temporal rule: the calendar-date checks on
//! booking creation, the CURRENT/PAST/FUTURE facets and the last/next
//! booking projection.
//!
//! Production code uses [`SystemClock`]; tests pin time with [`FixedClock`].

use std::fmt::Debug;

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Provides the current local date-time.
pub trait Clock: Send + Sync + Debug {
    /// The current instant.
    fn now(&self) -> NaiveDateTime;

    /// The current calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub const fn new(now: NaiveDateTime) -> Self {
        FixedClock(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
