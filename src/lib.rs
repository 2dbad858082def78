//! Keyweb: a keyboard-first minimal web browser shell.
//!
//! The library holds everything except process setup: query classification,
//! the ranked history store, the command bar and the window controller. The
//! page engine is consumed through [`ui::content_view::ContentView`].

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
pub mod ui;
