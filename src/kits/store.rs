//! In-memory kit storage keyed by user.
//!
//! The store holds no policy. Every operation is total over unknown users
//! and kits: absence is `None`, `false` or an empty iterator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::kit::{Kit, UserId, UserKits};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KitStore<T> {
    users: BTreeMap<UserId, UserKits<T>>,
}

impl<T> Default for KitStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> KitStore<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            users: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get_user_kits(&self, user: UserId) -> Option<&UserKits<T>> {
        self.users.get(&user)
    }

    /// Existing entry for `user`, or a freshly stored empty one.
    pub fn get_or_create_user_kits(&mut self, user: UserId) -> &UserKits<T> {
        self.entry(user)
    }

    #[must_use]
    pub fn find_kit(&self, user: UserId, name: &str) -> Option<&Kit<T>> {
        self.users.get(&user)?.find(name)
    }

    /// Append `kit` to the user's list.
    ///
    /// Names are not re-checked here; callers remove a same-named kit first.
    pub fn add_kit(&mut self, user: UserId, kit: Kit<T>) {
        self.entry(user).push(kit);
    }

    pub fn remove_kit(&mut self, user: UserId, name: &str) -> bool {
        self.users
            .get_mut(&user)
            .is_some_and(|kits| kits.remove(name))
    }

    /// Kits of `user` in insertion order. Cloning the iterator restarts it.
    pub fn list_kits(&self, user: UserId) -> impl Iterator<Item = &Kit<T>> + Clone + '_ {
        self.users
            .get(&user)
            .map_or(&[][..], UserKits::kits)
            .iter()
    }

    #[must_use]
    pub fn kit_count(&self, user: UserId) -> usize {
        self.users.get(&user).map_or(0, UserKits::len)
    }

    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn users(&self) -> impl Iterator<Item = &UserKits<T>> + '_ {
        self.users.values()
    }

    fn entry(&mut self, user: UserId) -> &mut UserKits<T> {
        self.users
            .entry(user)
            .or_insert_with(|| UserKits::new(user))
    }
}
