use std::time::{Duration, Instant};

/// Sliding-window admission check, one instance per connection.
pub trait RateLimiter: Send {
    /// Record one inbound message at `now`; false when the window budget
    /// is already spent.
    fn observe(&mut self, now: Instant) -> bool;
}

/// Message timestamps within the window, pruned on every observation.
pub struct SlidingWindow {
    window: Duration,
    max_messages: usize,
    hits: Vec<Instant>,
}

impl SlidingWindow {
    pub fn new(window: Duration, max_messages: usize) -> Self {
        Self {
            window,
            max_messages,
            hits: Vec::new(),
        }
    }
}

impl RateLimiter for SlidingWindow {
    fn observe(&mut self, now: Instant) -> bool {
        self.hits.retain(|t| now.duration_since(*t) < self.window);
        if self.hits.len() >= self.max_messages {
            return false;
        }
        self.hits.push(now);
        true
    }
}
