//! Utility functions

use crate::constants::APP_NAME;
use std::path::PathBuf;

/// App data directory (settings, logs, cache)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Portrait cache directory
pub fn get_cache_dir() -> PathBuf {
    get_data_dir().join("cache")
}
