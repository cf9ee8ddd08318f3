//! Plain-data view of everything a [`crate::KitService`] owns, for hosts
//! that persist kits between restarts.

use serde::{Deserialize, Serialize};

use crate::cooldown::CooldownTracker;
use crate::kits::KitStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct KitState<T> {
    #[serde(default)]
    pub kits: KitStore<T>,
    #[serde(default)]
    pub cooldowns: CooldownTracker,
}

impl<T> Default for KitState<T> {
    fn default() -> Self {
        Self {
            kits: KitStore::new(),
            cooldowns: CooldownTracker::new(),
        }
    }
}
