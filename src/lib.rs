//! autokit - per-user named kit snapshots for game-server plugins.
//!
//! A host captures whatever a "kit" means to it (an inventory, a loadout, a
//! build), and [`KitService`] stores it under a name per user, enforcing a
//! shared cooldown between actions and a per-user kit limit. Outcomes are
//! reported as [`Notice`]s, which [`TemplateNotifier`] renders with the
//! configured chat templates.

pub mod clock;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod kits;
pub mod notify;
pub mod service;
pub mod state;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, KitsConfig};
pub use cooldown::{CooldownStatus, CooldownTracker};
pub use error::{KitError, Result};
pub use kits::{Kit, KitStore, UserId, UserKits};
pub use notify::{MessageKey, NotificationSink, Notice, RecordingSink, TemplateNotifier};
pub use service::{KitService, UserSession};
pub use state::KitState;
