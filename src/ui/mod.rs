//! Keyweb UI layer.
//!
//! Window-level controllers that sit between keyboard input and the content
//! engine. The engine itself is consumed through the [`content_view::ContentView`]
//! trait; [`content_view::HeadlessView`] stands in for it in the console shell
//! and in tests.

pub mod browser_window;
pub mod command_bar;
pub mod content_view;
