// Keyweb platform paths for Linux
// Config: ~/.config/keyweb
// Data:   ~/.local/share/keyweb

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "keyweb";

/// Returns `$HOME`, or `/tmp` when unset.
pub fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/keyweb` if set, otherwise `~/.config/keyweb`.
pub fn get_config_dir() -> PathBuf {
    xdg_dir(env::var("XDG_CONFIG_HOME").ok(), &[".config"])
}

/// Uses `$XDG_DATA_HOME/keyweb` if set, otherwise `~/.local/share/keyweb`.
pub fn get_data_dir() -> PathBuf {
    xdg_dir(env::var("XDG_DATA_HOME").ok(), &[".local", "share"])
}

fn xdg_dir(xdg: Option<String>, fallback: &[&str]) -> PathBuf {
    match xdg.filter(|v| !v.is_empty()) {
        Some(base) => PathBuf::from(base).join(APP_DIR),
        None => {
            let mut dir = home_dir();
            for part in fallback {
                dir.push(part);
            }
            dir.join(APP_DIR)
        }
    }
}
