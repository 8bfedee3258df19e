//! Utility functions

use crate::constants::APP_NAME;
use std::path::PathBuf;

/// Per-user data directory holding settings.json and logs/
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// File name used by the daily rolling log appender
pub fn log_file_prefix() -> String {
    format!("{}.log", APP_NAME.to_lowercase().replace(' ', "-"))
}
