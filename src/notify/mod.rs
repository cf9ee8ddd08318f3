//! Outcome notices and the sinks that receive them.
//!
//! The service picks a [`MessageKey`] and its positional arguments; turning
//! that into text and delivering it belongs to the host (see
//! [`template::TemplateNotifier`] for a ready-made renderer).

pub mod template;

use serde::{Deserialize, Serialize};

use crate::kits::UserId;

pub use template::TemplateNotifier;

/// Closed set of user-visible outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    NoKit,
    Applied,
    Saved,
    Removed,
    List,
    CoolDown,
    NoKitName,
    KitLimitReached,
}

impl MessageKey {
    pub const ALL: [Self; 8] = [
        Self::NoKit,
        Self::Applied,
        Self::Saved,
        Self::Removed,
        Self::List,
        Self::CoolDown,
        Self::NoKitName,
        Self::KitLimitReached,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoKit => "no_kit",
            Self::Applied => "applied",
            Self::Saved => "saved",
            Self::Removed => "removed",
            Self::List => "list",
            Self::CoolDown => "cool_down",
            Self::NoKitName => "no_kit_name",
            Self::KitLimitReached => "kit_limit_reached",
        }
    }

    /// Number of positional arguments a notice with this key carries.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::NoKitName => 0,
            _ => 1,
        }
    }
}

/// A single outcome with its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", rename_all = "snake_case")]
pub enum Notice {
    NoKit { name: String },
    Applied { name: String },
    Saved { name: String },
    Removed { name: String },
    List { name: String },
    CoolDown { remaining_seconds: u64 },
    NoKitName,
    KitLimitReached { limit: usize },
}

impl Notice {
    #[must_use]
    pub const fn key(&self) -> MessageKey {
        match self {
            Self::NoKit { .. } => MessageKey::NoKit,
            Self::Applied { .. } => MessageKey::Applied,
            Self::Saved { .. } => MessageKey::Saved,
            Self::Removed { .. } => MessageKey::Removed,
            Self::List { .. } => MessageKey::List,
            Self::CoolDown { .. } => MessageKey::CoolDown,
            Self::NoKitName => MessageKey::NoKitName,
            Self::KitLimitReached { .. } => MessageKey::KitLimitReached,
        }
    }

    /// Positional arguments, in template order.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::NoKit { name }
            | Self::Applied { name }
            | Self::Saved { name }
            | Self::Removed { name }
            | Self::List { name } => vec![name.clone()],
            Self::CoolDown { remaining_seconds } => vec![remaining_seconds.to_string()],
            Self::NoKitName => Vec::new(),
            Self::KitLimitReached { limit } => vec![limit.to_string()],
        }
    }
}

/// Receiver of outcome notices, supplied by the host.
pub trait NotificationSink {
    fn notify(&mut self, user: UserId, notice: Notice);
}

impl<F> NotificationSink for F
where
    F: FnMut(UserId, Notice),
{
    fn notify(&mut self, user: UserId, notice: Notice) {
        self(user, notice);
    }
}

/// Sink that keeps every notice in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    entries: Vec<(UserId, Notice)>,
}

impl RecordingSink {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[(UserId, Notice)] {
        &self.entries
    }

    #[must_use]
    pub fn notices_for(&self, user: UserId) -> Vec<&Notice> {
        self.entries
            .iter()
            .filter(|(recipient, _)| *recipient == user)
            .map(|(_, notice)| notice)
            .collect()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Notice> {
        self.entries.last().map(|(_, notice)| notice)
    }

    /// Drain everything recorded so far.
    pub fn take(&mut self) -> Vec<(UserId, Notice)> {
        std::mem::take(&mut self.entries)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, user: UserId, notice: Notice) {
        self.entries.push((user, notice));
    }
}
