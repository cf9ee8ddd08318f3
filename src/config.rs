use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{KitError, Result};
use crate::notify::MessageKey;
use crate::notify::template::check_template;

pub const DEFAULT_COOLDOWN_SECONDS: u64 = 5;
pub const DEFAULT_KIT_LIMIT: usize = 5;
pub const DEFAULT_PLUGIN_NAME: &str = "AutoKit";
pub const DEFAULT_CHAT_PREFIX: &str = "[<color=yellow>{0}</color>]";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub kits: KitsConfig,
    pub chat: ChatConfig,
    pub messages: MessagesConfig,
}

impl Config {
    /// Resolve configuration: defaults, then one TOML file (explicit path,
    /// `AUTOKIT_CONFIG`, or the global `autokit/config.toml`), then
    /// `AUTOKIT_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("AUTOKIT_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                KitError::MissingConfig(format!("config file {} not found", path.display()))
            })?;
            config.merge_patch(patch);
        } else if let Some(global) = Self::load_global()? {
            config.merge_patch(global);
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Defaults patched with an in-memory TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| KitError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            debug!("no platform config directory, using defaults");
            return Ok(None);
        };
        Self::load_patch(&dir.join("autokit/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| KitError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| KitError::Config(format!("parse config {}: {err}", path.display())))?;
        debug!(path = %path.display(), "loaded config patch");
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.kits {
            self.kits.merge(patch);
        }
        if let Some(patch) = patch.chat {
            self.chat.merge(patch);
        }
        if let Some(patch) = patch.messages {
            self.messages.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `AUTOKIT_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = parse_override("AUTOKIT_COOLDOWN_SECONDS", &lookup)? {
            self.kits.cooldown_seconds = value;
        }
        if let Some(value) = parse_override("AUTOKIT_KIT_LIMIT", &lookup)? {
            self.kits.kit_limit = value;
        }
        if let Some(value) = lookup("AUTOKIT_PLUGIN_NAME") {
            self.chat.plugin_name = value;
        }
        if let Some(value) = lookup("AUTOKIT_CHAT_PREFIX") {
            self.chat.prefix = value;
        }
        Ok(())
    }

    /// Reject templates that reference missing arguments or have stray braces.
    pub fn validate(&self) -> Result<()> {
        check_template(&self.chat.prefix, 1).map_err(|reason| KitError::InvalidTemplate {
            key: "chat.prefix",
            reason,
        })?;
        for key in MessageKey::ALL {
            check_template(self.messages.template(key), key.arity()).map_err(|reason| {
                KitError::InvalidTemplate {
                    key: key.as_str(),
                    reason,
                }
            })?;
        }
        Ok(())
    }
}

/// Policy settings consumed by [`crate::KitService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitsConfig {
    pub cooldown_seconds: u64,
    pub kit_limit: usize,
}

impl Default for KitsConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
            kit_limit: DEFAULT_KIT_LIMIT,
        }
    }
}

impl KitsConfig {
    #[must_use]
    pub const fn new(cooldown_seconds: u64, kit_limit: usize) -> Self {
        Self {
            cooldown_seconds,
            kit_limit,
        }
    }

    fn merge(&mut self, patch: KitsPatch) {
        if let Some(value) = patch.cooldown_seconds {
            self.cooldown_seconds = value;
        }
        if let Some(value) = patch.kit_limit {
            self.kit_limit = value;
        }
    }
}

/// Cosmetic chat settings; `prefix` is rendered with the plugin name as `{0}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub plugin_name: String,
    pub prefix: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            plugin_name: DEFAULT_PLUGIN_NAME.to_string(),
            prefix: DEFAULT_CHAT_PREFIX.to_string(),
        }
    }
}

impl ChatConfig {
    fn merge(&mut self, patch: ChatPatch) {
        if let Some(value) = patch.plugin_name {
            self.plugin_name = value;
        }
        if let Some(value) = patch.prefix {
            self.prefix = value;
        }
    }
}

/// Message templates, one per [`MessageKey`], with `{0}` style placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub no_kit: String,
    pub applied: String,
    pub saved: String,
    pub removed: String,
    pub list: String,
    pub cool_down: String,
    pub no_kit_name: String,
    pub kit_limit_reached: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            no_kit: "Kit <color=orange>{0}</color> does not exist.".to_string(),
            applied: "Kit <color=orange>{0}</color> applied.".to_string(),
            saved: "Kit <color=orange>{0}</color> saved.".to_string(),
            removed: "Kit <color=orange>{0}</color> removed.".to_string(),
            list: "- <color=orange>{0}</color>".to_string(),
            cool_down: "Please wait {0} seconds before using kits again.".to_string(),
            no_kit_name: "You must provide a kit name.".to_string(),
            kit_limit_reached: "You can only save {0} kits.".to_string(),
        }
    }
}

impl MessagesConfig {
    #[must_use]
    pub fn template(&self, key: MessageKey) -> &str {
        match key {
            MessageKey::NoKit => &self.no_kit,
            MessageKey::Applied => &self.applied,
            MessageKey::Saved => &self.saved,
            MessageKey::Removed => &self.removed,
            MessageKey::List => &self.list,
            MessageKey::CoolDown => &self.cool_down,
            MessageKey::NoKitName => &self.no_kit_name,
            MessageKey::KitLimitReached => &self.kit_limit_reached,
        }
    }

    fn merge(&mut self, patch: MessagesPatch) {
        let fields = [
            (&mut self.no_kit, patch.no_kit),
            (&mut self.applied, patch.applied),
            (&mut self.saved, patch.saved),
            (&mut self.removed, patch.removed),
            (&mut self.list, patch.list),
            (&mut self.cool_down, patch.cool_down),
            (&mut self.no_kit_name, patch.no_kit_name),
            (&mut self.kit_limit_reached, patch.kit_limit_reached),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub kits: Option<KitsPatch>,
    pub chat: Option<ChatPatch>,
    pub messages: Option<MessagesPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct KitsPatch {
    pub cooldown_seconds: Option<u64>,
    pub kit_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChatPatch {
    pub plugin_name: Option<String>,
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MessagesPatch {
    pub no_kit: Option<String>,
    pub applied: Option<String>,
    pub saved: Option<String>,
    pub removed: Option<String>,
    pub list: Option<String>,
    pub cool_down: Option<String>,
    pub no_kit_name: Option<String>,
    pub kit_limit_reached: Option<String>,
}

fn parse_override<V, F>(key: &str, lookup: &F) -> Result<Option<V>>
where
    V: FromStr,
    V::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<V>()
            .map(Some)
            .map_err(|err| KitError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}
