use std::time::{Duration, Instant};

/// Suppresses progress reporting for a short window after a user seek, so
/// position updates from half-applied seeks do not fight the scrub.
#[derive(Debug, Clone)]
pub struct SeekGuard {
    window: Duration,
    until: Option<Instant>,
}

impl SeekGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            until: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.until = Some(now + self.window);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }
}
