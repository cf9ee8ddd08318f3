//! Per-user cooldown tracking.
//!
//! The window slides on the last *allowed* action: a check that finds the
//! user ready stamps the current time, a check that finds the user on
//! cooldown leaves the stamp alone, so repeated attempts never extend the
//! lockout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kits::UserId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CooldownStatus {
    Active { remaining_seconds: u64 },
    Ready,
}

impl CooldownStatus {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active { .. })
    }

    #[must_use]
    pub const fn remaining_seconds(self) -> u64 {
        match self {
            Self::Active { remaining_seconds } => remaining_seconds,
            Self::Ready => 0,
        }
    }
}

/// Last allowed action time (unix seconds) per user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CooldownTracker {
    last_actions: BTreeMap<UserId, i64>,
}

impl CooldownTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_actions: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn last_action(&self, user: UserId) -> Option<i64> {
        self.last_actions.get(&user).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.last_actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_actions.is_empty()
    }

    /// Status at `now` without touching the tracker.
    #[must_use]
    pub fn peek(&self, user: UserId, now: i64, cooldown_seconds: u64) -> CooldownStatus {
        let Some(last) = self.last_action(user) else {
            return CooldownStatus::Ready;
        };
        match cooldown_remaining_seconds(last, now, cooldown_seconds) {
            0 => CooldownStatus::Ready,
            remaining_seconds => CooldownStatus::Active { remaining_seconds },
        }
    }

    /// Status at `now`; a ready user is stamped with `now`.
    pub fn check(&mut self, user: UserId, now: i64, cooldown_seconds: u64) -> CooldownStatus {
        let status = self.peek(user, now, cooldown_seconds);
        if status == CooldownStatus::Ready {
            self.record(user, now);
        }
        status
    }

    pub fn record(&mut self, user: UserId, now: i64) {
        self.last_actions.insert(user, now);
    }
}

// A clock that moved backwards counts as zero elapsed time, so the
// remaining wait never exceeds the configured cooldown.
fn cooldown_remaining_seconds(last: i64, now: i64, cooldown_seconds: u64) -> u64 {
    let elapsed = u64::try_from(now.saturating_sub(last)).unwrap_or(0);
    cooldown_seconds.saturating_sub(elapsed)
}
