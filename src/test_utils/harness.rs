//! Scripted host for driving a [`KitService`] in tests.
//!
//! Payloads are plain strings, time is a [`ManualClock`] and every notice
//! lands in a [`RecordingSink`], so a scenario reads as a list of [`Step`]s
//! and the notices each one produced.

use std::convert::Infallible;

use crate::clock::ManualClock;
use crate::config::KitsConfig;
use crate::kits::{Kit, UserId};
use crate::notify::{Notice, RecordingSink};
use crate::service::KitService;

/// 2024-01-01T00:00:00Z.
pub const HARNESS_EPOCH: i64 = 1_704_067_200;

pub type HarnessService = KitService<String, RecordingSink, ManualClock>;

/// One host action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Save {
        user: UserId,
        name: &'static str,
        payload: &'static str,
    },
    Apply {
        user: UserId,
        name: &'static str,
    },
    Remove {
        user: UserId,
        name: &'static str,
    },
    List {
        user: UserId,
    },
    CheckCoolDown {
        user: UserId,
    },
    Wait {
        seconds: i64,
    },
}

pub struct KitHarness {
    pub service: HarnessService,
    pub clock: ManualClock,
    applied: Vec<(UserId, String)>,
    cool_down_calls: Vec<bool>,
}

impl KitHarness {
    #[must_use]
    pub fn new(cooldown_seconds: u64, kit_limit: usize) -> Self {
        Self::with_settings(KitsConfig::new(cooldown_seconds, kit_limit))
    }

    #[must_use]
    pub fn with_settings(settings: KitsConfig) -> Self {
        let clock = ManualClock::new(HARNESS_EPOCH);
        Self {
            service: KitService::with_clock(settings, RecordingSink::new(), clock.clone()),
            clock,
            applied: Vec::new(),
            cool_down_calls: Vec::new(),
        }
    }

    /// Run one step and return the notices it produced.
    pub fn run(&mut self, step: &Step) -> Vec<Notice> {
        match *step {
            Step::Save {
                user,
                name,
                payload,
            } => {
                let _ = self
                    .service
                    .save(user, name, |_| Ok::<_, Infallible>(payload.to_string()));
            }
            Step::Apply { user, name } => {
                let applied = &mut self.applied;
                let _ = self.service.apply(user, name, |user, kit| {
                    applied.push((user, kit.payload().clone()));
                    Ok::<_, Infallible>(())
                });
            }
            Step::Remove { user, name } => {
                self.service.remove(user, name);
            }
            Step::List { user } => {
                self.service.list(user);
            }
            Step::CheckCoolDown { user } => {
                let calls = &mut self.cool_down_calls;
                self.service.check_cool_down(user, |active| calls.push(active));
            }
            Step::Wait { seconds } => self.clock.advance(seconds),
        }
        self.service
            .sink_mut()
            .take()
            .into_iter()
            .map(|(_, notice)| notice)
            .collect()
    }

    /// Run every step, concatenating their notices.
    pub fn run_all(&mut self, steps: &[Step]) -> Vec<Notice> {
        steps.iter().flat_map(|step| self.run(step)).collect()
    }

    #[must_use]
    pub fn kit_names(&self, user: UserId) -> Vec<String> {
        self.service
            .store()
            .list_kits(user)
            .map(|kit| kit.name().to_string())
            .collect()
    }

    #[must_use]
    pub fn payload(&self, user: UserId, name: &str) -> Option<&str> {
        self.service
            .store()
            .find_kit(user, name)
            .map(Kit::payload)
            .map(String::as_str)
    }

    /// Payloads handed to the apply callback so far.
    #[must_use]
    pub fn applied(&self) -> &[(UserId, String)] {
        &self.applied
    }

    /// Values passed to the `check_cool_down` callback so far.
    #[must_use]
    pub fn cool_down_calls(&self) -> &[bool] {
        &self.cool_down_calls
    }
}
