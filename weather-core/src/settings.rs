//! Persisted string preferences behind a swappable store.

use anyhow::Result;
use std::{collections::HashMap, path::PathBuf};

use crate::config::Config;

pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keeps preferences in the `[settings]` table of the config file.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
    config: Config,
}

impl FileSettingsStore {
    /// Open the store at the platform config path.
    pub fn open() -> Result<Self> {
        Self::open_at(Config::config_file_path()?)
    }

    pub fn open_at(path: PathBuf) -> Result<Self> {
        let config = Config::load_from(&path)?;
        Ok(Self { path, config })
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.config.settings.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.config.settings.insert(key.to_string(), value.to_string());
        self.config.save_to(&self.path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: HashMap<String, String>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
