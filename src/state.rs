use std::sync::Arc;

use crate::database::SharedRepository;
use crate::services::keyed_lock::KeyedLocks;
use crate::validation::{BusinessCalendar, SharedClock, SystemClock};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub repository: SharedRepository,
    pub calendar: BusinessCalendar,
    pub clock: SharedClock,
    /// Per-employee locks held while a timecard is checked and inserted
    pub timecard_locks: KeyedLocks<i32>,
}

impl AppState {
    pub fn new(repository: SharedRepository, calendar: BusinessCalendar) -> Self {
        Self {
            repository,
            calendar,
            clock: Arc::new(SystemClock),
            timecard_locks: KeyedLocks::new(),
        }
    }

    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }
}
