//! Delayed reload scheduling.
//!
//! Clicking an intercepted hash link navigates client-side and then forces
//! a reload shortly after, giving the page's router a moment to settle.
//! The pending reload is plain state driven by
//! [`Overlay::tick`](crate::overlay::Overlay::tick): it can be observed,
//! re-armed, and cancelled, and it dies with the overlay.

use std::time::{Duration, Instant};

/// A one-shot scheduled reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReload {
    due: Instant,
}

impl PendingReload {
    /// Arms a reload `delay` from `now`.
    pub fn arm(now: Instant, delay: Duration) -> Self {
        Self { due: now + delay }
    }

    /// True once `now` has reached the deadline.
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Time left until the reload fires (zero when due).
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}
