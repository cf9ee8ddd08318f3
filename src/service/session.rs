use crate::clock::Clock;
use crate::cooldown::CooldownStatus;
use crate::kits::{Kit, UserId};
use crate::notify::NotificationSink;

use super::KitService;

/// [`KitService`] operations bound to a single user, for hosts that resolve
/// the player once per command.
pub struct UserSession<'a, T, N, C> {
    service: &'a mut KitService<T, N, C>,
    user: UserId,
}

impl<'a, T, N, C> UserSession<'a, T, N, C>
where
    N: NotificationSink,
    C: Clock,
{
    pub(super) fn new(service: &'a mut KitService<T, N, C>, user: UserId) -> Self {
        Self { service, user }
    }

    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    pub fn save<F, E>(&mut self, name: &str, capture: F) -> Result<bool, E>
    where
        F: FnOnce(UserId) -> Result<T, E>,
    {
        self.service.save(self.user, name, capture)
    }

    pub fn apply<F, E>(&mut self, name: &str, apply: F) -> Result<bool, E>
    where
        F: FnOnce(UserId, &Kit<T>) -> Result<(), E>,
    {
        self.service.apply(self.user, name, apply)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.service.remove(self.user, name)
    }

    pub fn list(&mut self) -> usize {
        self.service.list(self.user)
    }

    pub fn check_cool_down<F>(&mut self, callback: F) -> bool
    where
        F: FnOnce(bool),
    {
        self.service.check_cool_down(self.user, callback)
    }

    #[must_use]
    pub fn cool_down_status(&self) -> CooldownStatus {
        self.service.cool_down_status(self.user)
    }

    /// The user's kits in display order.
    pub fn kits(&self) -> impl Iterator<Item = &Kit<T>> + Clone + '_ {
        self.service.store().list_kits(self.user)
    }
}
