//! Kit policy and orchestration.
//!
//! [`KitService`] is the only write path to a [`KitStore`]. It validates kit
//! names, enforces the per-user cooldown and the kit limit, invokes the
//! host's capture/apply callbacks, and reports every user-visible outcome as
//! a [`Notice`] on the configured [`NotificationSink`].
//!
//! Policy rejections are never errors. The `Result` returned by
//! [`KitService::save`] and [`KitService::apply`] carries only what the host
//! callbacks themselves return.

mod session;

use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::KitsConfig;
use crate::cooldown::{CooldownStatus, CooldownTracker};
use crate::kits::{Kit, KitStore, UserId};
use crate::notify::{Notice, NotificationSink};
use crate::state::KitState;

pub use session::UserSession;

pub struct KitService<T, N, C = SystemClock> {
    store: KitStore<T>,
    cooldowns: CooldownTracker,
    settings: KitsConfig,
    sink: N,
    clock: C,
}

impl<T, N> KitService<T, N, SystemClock>
where
    N: NotificationSink,
{
    pub fn new(settings: KitsConfig, sink: N) -> Self {
        Self::with_clock(settings, sink, SystemClock)
    }
}

impl<T, N, C> KitService<T, N, C>
where
    N: NotificationSink,
    C: Clock,
{
    pub fn with_clock(settings: KitsConfig, sink: N, clock: C) -> Self {
        Self::from_state(KitState::default(), settings, sink, clock)
    }

    /// Resume from previously exported state.
    pub fn from_state(state: KitState<T>, settings: KitsConfig, sink: N, clock: C) -> Self {
        Self {
            store: state.kits,
            cooldowns: state.cooldowns,
            settings,
            sink,
            clock,
        }
    }

    /// Save the result of `capture` as `name` for `user`.
    ///
    /// Returns `Ok(true)` when the kit was stored. A same-named kit is removed
    /// (with [`Notice::Removed`]) before the limit check, so a re-save frees
    /// its own slot. A user holding more kits than the limit (the limit was
    /// lowered) loses the old kit and still gets [`Notice::KitLimitReached`].
    pub fn save<F, E>(&mut self, user: UserId, name: &str, capture: F) -> Result<bool, E>
    where
        F: FnOnce(UserId) -> Result<T, E>,
    {
        if !self.can_proceed(user, name) {
            return Ok(false);
        }

        if self.remove(user, name) {
            debug!(user_id = %user, kit = name, "replacing existing kit");
        }

        let limit = self.settings.kit_limit;
        if self.store.get_or_create_user_kits(user).len() >= limit {
            info!(user_id = %user, kit = name, limit, "kit limit reached");
            self.sink.notify(user, Notice::KitLimitReached { limit });
            return Ok(false);
        }

        let payload = match capture(user) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(user_id = %user, kit = name, "kit capture failed");
                return Err(err);
            }
        };
        self.store.add_kit(user, Kit::new(name, payload));
        info!(user_id = %user, kit = name, "kit saved");
        self.sink.notify(
            user,
            Notice::Saved {
                name: name.to_string(),
            },
        );
        Ok(true)
    }

    /// Hand the kit called `name` to `apply`.
    ///
    /// Returns `Ok(true)` when `apply` ran and succeeded. An error from
    /// `apply` is returned as-is and no [`Notice::Applied`] is sent.
    pub fn apply<F, E>(&mut self, user: UserId, name: &str, apply: F) -> Result<bool, E>
    where
        F: FnOnce(UserId, &Kit<T>) -> Result<(), E>,
    {
        if !self.can_proceed(user, name) {
            return Ok(false);
        }

        let Some(kit) = self.store.find_kit(user, name) else {
            debug!(user_id = %user, kit = name, "kit not found");
            self.sink.notify(
                user,
                Notice::NoKit {
                    name: name.to_string(),
                },
            );
            return Ok(false);
        };

        apply(user, kit)?;
        info!(user_id = %user, kit = name, "kit applied");
        self.sink.notify(
            user,
            Notice::Applied {
                name: name.to_string(),
            },
        );
        Ok(true)
    }

    /// Remove a kit. Not gated by name validation or cooldown; an unknown
    /// kit is a silent no-op.
    pub fn remove(&mut self, user: UserId, name: &str) -> bool {
        if !self.store.remove_kit(user, name) {
            return false;
        }
        info!(user_id = %user, kit = name, "kit removed");
        self.sink.notify(
            user,
            Notice::Removed {
                name: name.to_string(),
            },
        );
        true
    }

    /// Send one [`Notice::List`] per kit, in insertion order. Not gated by
    /// cooldown. Returns the number of kits listed.
    pub fn list(&mut self, user: UserId) -> usize {
        let mut count = 0;
        for kit in self.store.list_kits(user) {
            self.sink.notify(
                user,
                Notice::List {
                    name: kit.name().to_string(),
                },
            );
            count += 1;
        }
        debug!(user_id = %user, count, "listed kits");
        count
    }

    /// Run the cooldown check on its own and report the result to `callback`.
    ///
    /// `callback` runs exactly once: with `true` while on cooldown, followed
    /// by a [`Notice::CoolDown`], and with `false` otherwise. A check that
    /// finds the user ready starts a new window.
    pub fn check_cool_down<F>(&mut self, user: UserId, callback: F) -> bool
    where
        F: FnOnce(bool),
    {
        let status = self.consume_cooldown(user);
        callback(status.is_active());
        if let CooldownStatus::Active { remaining_seconds } = status {
            self.sink
                .notify(user, Notice::CoolDown { remaining_seconds });
        }
        status.is_active()
    }

    /// Current cooldown status without starting a new window.
    #[must_use]
    pub fn cool_down_status(&self, user: UserId) -> CooldownStatus {
        self.cooldowns.peek(
            user,
            self.clock.now_unix_seconds(),
            self.settings.cooldown_seconds,
        )
    }

    /// Bind the operations to one user.
    pub fn for_user(&mut self, user: UserId) -> UserSession<'_, T, N, C> {
        UserSession::new(self, user)
    }

    fn can_proceed(&mut self, user: UserId, name: &str) -> bool {
        if name.is_empty() {
            debug!(user_id = %user, "rejected empty kit name");
            self.sink.notify(user, Notice::NoKitName);
            return false;
        }

        if let CooldownStatus::Active { remaining_seconds } = self.consume_cooldown(user) {
            debug!(user_id = %user, kit = name, remaining_seconds, "kit action on cooldown");
            self.sink
                .notify(user, Notice::CoolDown { remaining_seconds });
            return false;
        }

        true
    }

    fn consume_cooldown(&mut self, user: UserId) -> CooldownStatus {
        let now = self.clock.now_unix_seconds();
        self.cooldowns
            .check(user, now, self.settings.cooldown_seconds)
    }
}

impl<T, N, C> KitService<T, N, C> {
    #[must_use]
    pub const fn store(&self) -> &KitStore<T> {
        &self.store
    }

    #[must_use]
    pub const fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }

    #[must_use]
    pub const fn settings(&self) -> &KitsConfig {
        &self.settings
    }

    #[must_use]
    pub const fn sink(&self) -> &N {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Copy of the kits and cooldowns, for persistence.
    #[must_use]
    pub fn snapshot(&self) -> KitState<T>
    where
        T: Clone,
    {
        KitState {
            kits: self.store.clone(),
            cooldowns: self.cooldowns.clone(),
        }
    }

    pub fn into_state(self) -> KitState<T> {
        KitState {
            kits: self.store,
            cooldowns: self.cooldowns,
        }
    }
}
