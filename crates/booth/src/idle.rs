//! Hides the pointer after a stretch without input.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct IdleCursor {
    timeout: Duration,
    deadline: Option<Instant>,
    hidden: bool,
    suppressed: bool,
}

impl IdleCursor {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            deadline: None,
            hidden: false,
            suppressed: false,
        }
    }

    pub fn set_timeout(&mut self, timeout: Duration, now: Instant) {
        self.timeout = timeout;
        if self.deadline.is_some() {
            self.deadline = Some(now + timeout);
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// A countdown is running and a tick source is needed.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Shows the cursor and restarts the countdown.
    ///
    /// Returns `true` if the cursor was hidden before.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.suppressed {
            return false;
        }

        self.deadline = Some(now + self.timeout);
        std::mem::replace(&mut self.hidden, false)
    }

    /// Pointer activity. Same as [`IdleCursor::start`].
    pub fn activity(&mut self, now: Instant) -> bool {
        self.start(now)
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Keeps the cursor visible until [`IdleCursor::resume`]. Returns `true` if it was hidden.
    pub fn suppress(&mut self) -> bool {
        self.suppressed = true;
        self.deadline = None;
        std::mem::replace(&mut self.hidden, false)
    }

    pub fn resume(&mut self, now: Instant) {
        self.suppressed = false;
        self.start(now);
    }

    /// Returns `true` when this tick hid the cursor.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline && !self.suppressed => {
                self.deadline = None;
                self.hidden = true;
                true
            }
            _ => false,
        }
    }
}
