//! Kit data model: user identifiers, kits and per-user kit lists.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, host-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named snapshot of host-owned payload.
///
/// Kits are immutable; a re-save replaces the whole kit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kit<T> {
    name: String,
    payload: T,
}

impl<T> Kit<T> {
    pub fn new(name: impl Into<String>, payload: T) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    #[must_use]
    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Ordered kits saved by one user. Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserKits<T> {
    user_id: UserId,
    kits: Vec<Kit<T>>,
}

impl<T> UserKits<T> {
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            kits: Vec::new(),
        }
    }

    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Read-only view; mutation goes through [`super::KitStore`].
    #[must_use]
    pub fn kits(&self) -> &[Kit<T>] {
        &self.kits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kits.is_empty()
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Kit<T>> {
        self.kits.iter().find(|kit| kit.name == name)
    }

    pub(crate) fn push(&mut self, kit: Kit<T>) {
        self.kits.push(kit);
    }

    pub(crate) fn remove(&mut self, name: &str) -> bool {
        match self.kits.iter().position(|kit| kit.name == name) {
            Some(index) => {
                self.kits.remove(index);
                true
            }
            None => false,
        }
    }
}
