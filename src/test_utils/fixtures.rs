//! Temporary config files for loader tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::Config;
use crate::error::Result;

/// A scratch directory that holds config files and is removed on drop.
pub struct ConfigFixture {
    dir: TempDir,
}

impl ConfigFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `config.toml` in the fixture directory.
    pub fn write_config(&self, contents: &str) -> Result<PathBuf> {
        self.write_file("config.toml", contents)
    }

    pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write `contents` and load it through [`Config::load`].
    pub fn load(&self, contents: &str) -> Result<Config> {
        let path = self.write_config(contents)?;
        Config::load(Some(&path))
    }
}
