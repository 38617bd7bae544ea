//! Platform-specific location of tomatobox data files.
//!
//! Both the SQLite database and `config.json` live in one directory:
//!
//! - **Windows**: `%LOCALAPPDATA%\tomatobox\tomatobox`
//! - **macOS**: `~/Library/Application Support/tomatobox/tomatobox`
//! - **Linux**: `~/.local/share/tomatobox/tomatobox`

use super::metadata;
use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(metadata::vendor_name()).join(metadata::app_name());

        Self { base_path }
    }

    /// Returns the full path for `file_name`, creating the data directory on first use.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}
