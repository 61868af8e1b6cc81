// src/clock.rs

//! Source of "now" for everything that depends on the current date.
//!
//! The scheduler itself takes `today` as an argument; components that need
//! to pick a date (the CLI, the watch runtime, relative ages in the history
//! view) are handed a [`Clock`] instead of reading the system time.

use std::fmt::Debug;

use chrono::{DateTime, Local, NaiveDate, Utc};

pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date timelines are laid out from.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock. `today` is the local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Midnight UTC at the start of `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
