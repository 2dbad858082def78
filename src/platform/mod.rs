// Keyweb platform abstraction
// Provides platform-specific paths for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the current user's home directory.
///
/// Falls back to `/tmp` (or the default profile on Windows) when the
/// environment does not name one.
pub fn home_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::home_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::home_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::home_dir()
    }
}

/// Returns the platform-specific configuration directory for keyweb.
///
/// - **Linux**: `~/.config/keyweb` (or `$XDG_CONFIG_HOME/keyweb`)
/// - **macOS**: `~/Library/Application Support/Keyweb`
/// - **Windows**: `%APPDATA%/Keyweb`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory for keyweb.
///
/// - **Linux**: `~/.local/share/keyweb` (or `$XDG_DATA_HOME/keyweb`)
/// - **macOS**: `~/Library/Application Support/Keyweb`
/// - **Windows**: `%APPDATA%/Keyweb`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
