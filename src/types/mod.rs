// Keyweb shared type definitions
// Each submodule defines types used across the application.

pub mod content;
pub mod errors;
pub mod history;
pub mod keys;
pub mod query;
pub mod settings;
