//! Persisted preferences
//!
//! A single TOML key-value file in the simulator's preferences directory:
//!
//! ```toml
//! reverse = true
//! ```
//!
//! Anything that prevents reading a value is treated as "nothing stored".

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ConfigError;

/// File name used inside the preferences directory
pub const PREFS_FILE_NAME: &str = "trimhat.prf";

/// On-disk layout. Keys are optional so a missing key reads as "not stored".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reverse: Option<bool>,
}

/// Reads and writes the preference file
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for [`PREFS_FILE_NAME`] inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PREFS_FILE_NAME))
    }

    /// Store next to the host's own preference file
    ///
    /// The host reports a file path, not a directory; `None` if it has no
    /// parent to put ours in.
    pub fn beside(host_prefs_file: &Path) -> Option<Self> {
        host_prefs_file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Self::in_dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored reverse flag, or `None` if nothing usable is stored
    pub fn load_reverse(&self) -> Option<bool> {
        match self.read() {
            Ok(stored) => stored.reverse,
            Err(e) => {
                debug!("No stored preferences at {:?}: {}", self.path, e);
                None
            }
        }
    }

    /// Persist the reverse flag
    pub fn save_reverse(&self, reverse: bool) -> Result<(), ConfigError> {
        let stored = StoredPreferences {
            reverse: Some(reverse),
        };
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&stored)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn read(&self) -> Result<StoredPreferences, ConfigError> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }
}
