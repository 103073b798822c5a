//! Flat key/value configuration file
//!
//! Every value is a string; typed interpretation happens in
//! [`Settings`](super::Settings). The file is a JSON object of strings so it
//! stays hand-editable.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Result;

/// String key/value store backed by a file
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Empty store that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load `path`. A missing file gives an empty store bound to that path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let values = if path.exists() {
            let text = fs::read_to_string(path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text)?
            }
        } else {
            debug!(path = %path.display(), "config file not found, starting empty");
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// File this store is bound to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Value for `key`, or `default` when unset
    pub fn get(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Value for `key`, if set
    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// All entries, sorted by key
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Write back to the bound path, creating parent directories.
    ///
    /// In-memory stores are a no-op.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(path, text)?;
        debug!(path = %path.display(), entries = self.values.len(), "saved config");
        Ok(())
    }
}
