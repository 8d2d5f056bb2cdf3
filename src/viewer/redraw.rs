/// Redraw throttle with optional trailing-edge flush

use std::time::{Duration, Instant};

use crate::config::FlushPolicy;

/// Outcome of a redraw request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawDecision {
    /// Repaint now
    Now,
    /// Inside the cool-down window; one repaint is owed after `Duration`
    Deferred(Duration),
    /// Inside the cool-down window and discarded
    Dropped,
}

#[derive(Debug, Clone)]
pub struct RedrawScheduler {
    min_interval: Duration,
    policy: FlushPolicy,
    last_draw: Option<Instant>,
    pending: bool,
}

impl RedrawScheduler {
    pub fn new(min_interval: Duration, policy: FlushPolicy) -> Self {
        Self {
            min_interval,
            policy,
            last_draw: None,
            pending: false,
        }
    }

    fn remaining(&self, now: Instant) -> Option<Duration> {
        let last = self.last_draw?;
        let elapsed = now.saturating_duration_since(last);
        (elapsed < self.min_interval).then(|| self.min_interval - elapsed)
    }

    pub fn request(&mut self, now: Instant) -> RedrawDecision {
        match self.remaining(now) {
            None => {
                self.last_draw = Some(now);
                self.pending = false;
                RedrawDecision::Now
            }
            Some(wait) => match self.policy {
                FlushPolicy::Trailing => {
                    self.pending = true;
                    RedrawDecision::Deferred(wait)
                }
                FlushPolicy::Drop => RedrawDecision::Dropped,
            },
        }
    }

    /// Fire the owed repaint once the window has closed
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.pending || self.remaining(now).is_some() {
            return false;
        }
        self.pending = false;
        self.last_draw = Some(now);
        true
    }

    /// Time until the owed repaint, if one is owed
    pub fn time_to_flush(&self, now: Instant) -> Option<Duration> {
        if !self.pending {
            return None;
        }
        Some(self.remaining(now).unwrap_or(Duration::ZERO))
    }
}
