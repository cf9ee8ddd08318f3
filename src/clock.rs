//! Wall-clock sources used by cooldown checks.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Source of "now" in whole unix seconds.
pub trait Clock {
    fn now_unix_seconds(&self) -> i64;
}

/// UTC wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_seconds(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Manually driven clock.
///
/// Clones share the same instant, so a test can keep a handle while the
/// service owns another and advance time between operations.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_unix_seconds: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_unix_seconds)),
        }
    }

    pub fn set(&self, unix_seconds: i64) {
        self.now.store(unix_seconds, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_unix_seconds(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
