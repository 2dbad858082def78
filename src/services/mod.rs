// Keyweb services
// Stateless logic (query classification, path expansion) and the settings engine.

pub mod path_expander;
pub mod query_classifier;
pub mod settings_engine;
