//! Runtime settings read from the environment.
//!
//! | Variable             | Default                 |
//! |----------------------|-------------------------|
//! | `AUTOMPG_DATA_DIR`   | `.`                     |
//! | `AUTOMPG_SOURCE_URL` | UCI auto-mpg data URL   |
//! | `LOG_FILE_PATH`      | `logs/autompg.log`      |

use std::path::PathBuf;

use crate::corpus::CacheFiles;
use crate::fetch::DEFAULT_SOURCE_URL;

pub const RAW_FILE_NAME: &str = "auto-mpg.data.txt";
pub const CLEAN_FILE_NAME: &str = "auto-mpg.clean.txt";
pub const DEFAULT_LOG_FILE: &str = "logs/autompg.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub source_url: String,
    pub log_file_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for
    /// missing or empty values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            data_dir: get("AUTOMPG_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            source_url: get("AUTOMPG_SOURCE_URL").unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            log_file_path: get("LOG_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }

    pub fn cache_files(&self) -> CacheFiles {
        CacheFiles::new(
            self.data_dir.join(RAW_FILE_NAME),
            self.data_dir.join(CLEAN_FILE_NAME),
        )
    }
}
