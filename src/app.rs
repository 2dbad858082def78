//! App Core for keyweb.
//!
//! Owns the shared history store, the settings and every open window, and
//! manages the application lifecycle.

use std::rc::Rc;

use tracing::{info, warn};

use crate::managers::history_store::HistoryStore;
use crate::services::path_expander;
use crate::types::content::WindowRequest;
use crate::types::settings::BrowserSettings;
use crate::ui::browser_window::BrowserWindow;
use crate::ui::content_view::ContentView;

/// Builds the content view for a new window. The argument is the window's
/// incognito flag.
pub type ViewFactory<V> = Box<dyn FnMut(bool) -> V>;

/// Central application struct.
///
/// All windows share one history store; everything runs on the thread that
/// owns the `App`.
pub struct App<V: ContentView> {
    history: Rc<HistoryStore>,
    settings: BrowserSettings,
    windows: Vec<BrowserWindow<V>>,
    make_view: ViewFactory<V>,
}

impl<V: ContentView> App<V> {
    pub fn new(history: HistoryStore, settings: BrowserSettings, make_view: ViewFactory<V>) -> Self {
        Self {
            history: Rc::new(history),
            settings,
            windows: Vec::new(),
            make_view,
        }
    }

    /// Opens one window per startup target, or one window at the homepage
    /// when there are none.
    ///
    /// Targets that look like local paths open as `file://` URLs.
    pub fn startup(&mut self, targets: &[String], incognito: bool) {
        if targets.is_empty() {
            self.open_window(None, incognito);
        }
        for target in targets {
            let text = if path_expander::is_path_argument(target) {
                path_expander::file_url(target)
            } else {
                target.clone()
            };
            self.open_window(Some(&text), incognito);
        }
        self.pump();
    }

    /// Opens a window and loads `text` (or the homepage) in it.
    ///
    /// Returns the index of the new window.
    pub fn open_window(&mut self, text: Option<&str>, incognito: bool) -> usize {
        let view = (self.make_view)(incognito);
        let mut window = BrowserWindow::new(view, Rc::clone(&self.history), &self.settings, incognito);
        let target = text.unwrap_or(&self.settings.general.homepage).to_string();
        info!(target = %target, incognito, "opening window");
        window.resolve_and_load(&target);
        self.windows.push(window);
        self.windows.len() - 1
    }

    /// Delivers queued content events and opens every requested window,
    /// until nothing is pending.
    pub fn pump(&mut self) {
        loop {
            for window in &mut self.windows {
                window.pump_events();
            }
            let requests: Vec<WindowRequest> = self
                .windows
                .iter_mut()
                .flat_map(|w| w.take_requests())
                .collect();
            if requests.is_empty() {
                break;
            }
            for request in requests {
                self.open_window(request.url.as_deref(), request.incognito);
            }
        }
    }

    /// Closes the window at `index`. Out-of-range indexes are ignored.
    pub fn close_window(&mut self, index: usize) {
        if index < self.windows.len() {
            self.windows.remove(index);
        }
    }

    pub fn windows(&self) -> &[BrowserWindow<V>] {
        &self.windows
    }

    pub fn window_mut(&mut self, index: usize) -> Option<&mut BrowserWindow<V>> {
        self.windows.get_mut(index)
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Closes every window and then the history store, pruning expired
    /// records.
    pub fn shutdown(mut self) {
        self.windows.clear();
        match Rc::try_unwrap(self.history) {
            Ok(history) => {
                if let Err(e) = history.close() {
                    warn!(error = %e, "history prune failed on shutdown");
                }
            }
            // Still shared; the last owner prunes on drop.
            Err(_) => warn!("history store still in use at shutdown"),
        }
    }
}
