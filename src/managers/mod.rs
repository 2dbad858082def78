// Keyweb state managers
// Managers handle stateful operations: the history log, shortcut bindings and download hand-off.

pub mod download_manager;
pub mod history_store;
pub mod shortcut_table;
