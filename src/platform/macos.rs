// Keyweb platform paths for macOS
// Config: ~/Library/Application Support/Keyweb
// Data:   ~/Library/Application Support/Keyweb

use std::env;
use std::path::PathBuf;

/// Returns `$HOME`, or `/tmp` when unset.
pub fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `~/Library/Application Support/Keyweb`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("Keyweb")
}

/// `~/Library/Application Support/Keyweb`
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}
