//! Nullable clock: block time that only moves when a test says so.

use dnn_types::Timestamp;
use std::cell::Cell;

/// Deterministic stand-in for the block timestamp contract calls execute under.
pub struct NullClock {
    current: Cell<Timestamp>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(Timestamp::new(initial_secs)),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.current.get()
    }

    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get().plus_secs(secs));
    }

    /// Jump to one second after `deadline`, the first instant it counts as passed.
    pub fn advance_past(&self, deadline: Timestamp) {
        self.current.set(deadline.plus_secs(1));
    }

    pub fn set(&self, secs: u64) {
        self.current.set(Timestamp::new(secs));
    }
}
