//! Update throttle

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Tracks when the last update was accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThrottleState {
    /// Timestamp of the last accepted update, `None` if there has never been
    /// one.
    ///
    /// Units: milliseconds, monotonic
    last_update_ms: Option<i64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ThrottleState {
    /// True if more than `interval_ms` has passed since the last accepted
    /// update. Always true before the first update.
    pub fn is_due(&self, now_ms: i64, interval_ms: i64) -> bool {
        match self.last_update_ms {
            Some(last) => now_ms.saturating_sub(last) > interval_ms,
            None => true,
        }
    }

    /// Record an accepted update at `now_ms`.
    pub fn accept(&mut self, now_ms: i64) {
        self.last_update_ms = Some(now_ms);
    }

    pub fn last_update_ms(&self) -> Option<i64> {
        self.last_update_ms
    }
}
