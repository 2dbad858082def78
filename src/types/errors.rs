use thiserror::Error;

// === HistoryError ===

/// Errors related to the history store.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The history database could not be opened or its schema created.
    #[error("Failed to open history database: {0}")]
    Open(String),
    /// A statement against an open database failed.
    #[error("History database error: {0}")]
    Database(String),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    Io(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    Serialization(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === ShortcutError ===

/// Errors related to keyboard shortcut parsing and binding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShortcutError {
    /// The provided key combination could not be parsed.
    #[error("Invalid shortcut keys: {0}")]
    InvalidKeys(String),
    /// No action is known under the given name.
    #[error("Unknown shortcut action: {0}")]
    UnknownAction(String),
}

// === DownloadError ===

/// Errors related to handing a download off to the helper process.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The helper process could not be started.
    #[error("Failed to spawn download helper '{program}': {reason}")]
    Spawn { program: String, reason: String },
}

impl From<rusqlite::Error> for HistoryError {
    fn from(e: rusqlite::Error) -> Self {
        HistoryError::Database(e.to_string())
    }
}
