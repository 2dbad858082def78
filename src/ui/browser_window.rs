//! Browser window controller.
//!
//! Owns one command bar and one content view, translates committed text into
//! navigation, web search or in-page find, dispatches keyboard shortcuts and
//! records committed navigations into the shared history store.

use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::managers::download_manager::{DownloadManager, DownloadManagerTrait};
use crate::managers::history_store::{HistoryStore, HistoryStoreTrait};
use crate::managers::shortcut_table::{Action, ShortcutTable};
use crate::services::query_classifier;
use crate::types::content::{ContentEvent, FrameStyle, NewWindowKind, WindowRequest};
use crate::types::keys::KeyChord;
use crate::types::query::{FindDirection, QueryIntent, FIND_PREFIX};
use crate::types::settings::BrowserSettings;
use crate::ui::command_bar::{BarKeyOutcome, CommandBar};
use crate::ui::content_view::ContentView;

/// Title prefix shown by incognito windows.
pub const INCOGNITO_TITLE_PREFIX: &str = "incognito: ";

/// One top-level browser window.
pub struct BrowserWindow<V: ContentView> {
    view: V,
    bar: CommandBar,
    history: Rc<HistoryStore>,
    shortcuts: ShortcutTable,
    settings: BrowserSettings,
    downloads: DownloadManager,
    incognito: bool,
    last_chord: Option<(KeyChord, Instant)>,
    chord_timeout: Option<Duration>,
    committed_url: String,
    page_title: String,
    hovered_link: Option<String>,
    icon: Option<Vec<u8>>,
    certificate_error: bool,
    fullscreen: bool,
    requests: Vec<WindowRequest>,
}

impl<V: ContentView> BrowserWindow<V> {
    /// Creates a window around `view`.
    ///
    /// Shortcut overrides in `settings` that fail to parse are logged and
    /// the built-in table is used instead.
    pub fn new(view: V, history: Rc<HistoryStore>, settings: &BrowserSettings, incognito: bool) -> Self {
        let shortcuts = ShortcutTable::from_overrides(&settings.shortcuts).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring shortcut overrides");
            ShortcutTable::with_defaults()
        });

        Self {
            view,
            bar: CommandBar::new(settings.input.max_suggestion_rows),
            history,
            shortcuts,
            settings: settings.clone(),
            downloads: DownloadManager::new(settings.downloads.helper.clone()),
            incognito,
            last_chord: None,
            chord_timeout: settings.input.chord_timeout_ms.map(Duration::from_millis),
            committed_url: String::new(),
            page_title: String::new(),
            hovered_link: None,
            icon: None,
            certificate_error: false,
            fullscreen: false,
            requests: Vec::new(),
        }
    }

    /// Classifies `text` and acts on it: navigate, search the web, or search
    /// the current page.
    pub fn resolve_and_load(&mut self, text: &str) {
        let intent = query_classifier::classify(text);
        debug!(?intent, text, "resolving query");
        match intent {
            QueryIntent::NavigateUrl { with_scheme: true } => self.view.navigate(text),
            QueryIntent::NavigateUrl { with_scheme: false } => {
                let url = self.history.expand_abridged_address(text);
                self.view.navigate(&url);
            }
            QueryIntent::Search { .. } => self.web_search(intent.term(text)),
            QueryIntent::InPageSearch => self.in_page_search(text, FindDirection::Forward),
        }
    }

    /// Records `query` as a search and navigates to the search provider.
    pub fn web_search(&mut self, query: &str) {
        if !self.incognito {
            if let Err(e) = self.history.append("search", query) {
                warn!(error = %e, "failed to record search");
            }
        }
        let url = self.search_url(query);
        self.view.navigate(&url);
    }

    /// The provider URL for `query`, with the query URL-encoded.
    pub fn search_url(&self, query: &str) -> String {
        let search = &self.settings.search;
        match url::Url::parse_with_params(&search.url, &[(search.param.as_str(), query)]) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!(provider = %search.url, error = %e, "invalid search provider URL");
                let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
                format!("{}?{}={}", search.url, search.param, encoded)
            }
        }
    }

    /// Searches the page for the term of a `find:` query. Any other text,
    /// including an empty term, clears the highlights.
    pub fn in_page_search(&mut self, text: &str, direction: FindDirection) {
        let term = match query_classifier::classify(text) {
            QueryIntent::InPageSearch => &text[FIND_PREFIX.len()..],
            _ => "",
        };
        self.view.find_text(term, direction);
    }

    /// Runs the live find for the current bar text.
    fn sync_find(&mut self) {
        let text = self.bar.text().to_string();
        self.in_page_search(&text, FindDirection::Forward);
    }

    /// Opens the bar with `prefix + content` selected after the prefix.
    pub fn open_bar(&mut self, prefix: &str, content: &str) {
        self.bar.open(prefix, content);
        self.sync_find();
    }

    /// Closes the bar and hands focus back to the page.
    pub fn close_bar(&mut self) {
        self.bar.close();
        self.view.focus();
        self.sync_find();
    }

    /// A click landed outside the suggestion list. The bar stays open with
    /// its text as typed.
    pub fn click_outside_suggestions(&mut self) {
        self.bar.hide_suggestions();
    }

    /// Feeds a text change made directly in the bar's input field.
    pub fn text_edited(&mut self, text: &str) {
        self.bar.on_text_edited(text, self.history.as_ref());
        self.sync_find();
    }

    /// Acts on committed bar text. Find queries keep the bar open.
    pub fn commit(&mut self, text: &str) {
        self.resolve_and_load(text);
        if query_classifier::classify(text) != QueryIntent::InPageSearch {
            self.close_bar();
        }
    }

    /// Handles one key press. Returns false if nothing consumed it.
    ///
    /// The bar gets the first look while it is open, then the shortcut
    /// table, then text editing.
    pub fn handle_key(&mut self, chord: KeyChord) -> bool {
        match self.bar.handle_key(chord) {
            BarKeyOutcome::Handled => return true,
            BarKeyOutcome::Closed => {
                self.view.focus();
                self.sync_find();
                return true;
            }
            BarKeyOutcome::Committed(text) => {
                self.commit(&text);
                return true;
            }
            BarKeyOutcome::Unhandled => {}
        }

        if self.execute_shortcuts(chord) {
            return true;
        }

        if self.bar.edit_key(chord, self.history.as_ref()) {
            self.sync_find();
            return true;
        }
        false
    }

    /// Runs the first shortcut completed by `chord`.
    ///
    /// The chord is remembered as the first half of a possible two-chord
    /// shortcut whether or not anything matched.
    pub fn execute_shortcuts(&mut self, chord: KeyChord) -> bool {
        let now = Instant::now();
        let previous = self
            .last_chord
            .filter(|(_, at)| self.chord_timeout.map_or(true, |t| now.duration_since(*at) <= t))
            .map(|(c, _)| c);
        self.last_chord = Some((chord, now));

        match self.shortcuts.dispatch(previous, chord) {
            Some(action) => {
                debug!(%action, %chord, "shortcut");
                self.perform(action);
                true
            }
            None => false,
        }
    }

    /// Executes a window action.
    pub fn perform(&mut self, action: Action) {
        let step = self.settings.input.scroll_step;
        match action {
            Action::Forward => self.view.go_forward(),
            Action::Back => self.view.go_back(),
            Action::Reload => self.view.reload(),
            Action::ToggleBar => {
                let text = self.bar.text().to_string();
                if query_classifier::classify(&text) == QueryIntent::InPageSearch {
                    self.open_bar("", &text[FIND_PREFIX.len()..]);
                } else if !self.bar.is_visible() {
                    let url = self.view.url();
                    self.open_bar("", &url);
                } else {
                    self.close_bar();
                }
            }
            Action::Find => {
                let text = self.bar.text().to_string();
                if !self.bar.is_visible() || query_classifier::classify(&text) != QueryIntent::InPageSearch {
                    self.open_bar(FIND_PREFIX, &text);
                } else {
                    self.close_bar();
                }
            }
            Action::ScrollDown => self.scroll_by(0, step),
            Action::ScrollUp => self.scroll_by(0, -step),
            Action::ScrollRight => self.scroll_by(step, 0),
            Action::ScrollLeft => self.scroll_by(-step, 0),
            Action::PageDown => self.view.run_script("window.scrollBy(0, window.innerHeight / 2)"),
            Action::PageUp => self.view.run_script("window.scrollBy(0, -window.innerHeight / 2)"),
            Action::ScrollTop => self.view.run_script("window.scrollTo(0, 0);"),
            Action::ScrollBottom => {
                self.view.run_script("window.scrollTo(0, document.body.scrollHeight);")
            }
            Action::FindNext => {
                let text = self.bar.text().to_string();
                self.in_page_search(&text, FindDirection::Forward);
            }
            Action::FindPrevious => {
                let text = self.bar.text().to_string();
                self.in_page_search(&text, FindDirection::Backward);
            }
            Action::ZoomIn => self.zoom_by(self.settings.input.zoom_step),
            Action::ZoomOut => self.zoom_by(-self.settings.input.zoom_step),
            Action::ZoomReset => self.view.set_zoom_factor(1.0),
            Action::NewWindow => self.request_window(None, false, false),
            Action::NewIncognitoWindow => self.request_window(None, true, false),
            Action::ExitFullscreen => self.view.run_script("document.webkitExitFullscreen()"),
        }
    }

    fn scroll_by(&mut self, x: i32, y: i32) {
        self.view.run_script(&format!("window.scrollBy({}, {})", x, y));
    }

    fn zoom_by(&mut self, delta: f64) {
        let factor = self.view.zoom_factor() + delta;
        self.view.set_zoom_factor(factor);
    }

    fn request_window(&mut self, url: Option<String>, incognito: bool, background: bool) {
        info!(?url, incognito, background, "new window requested");
        self.requests.push(WindowRequest {
            url,
            incognito,
            background,
        });
    }

    /// Reacts to one event reported by the content view.
    pub fn handle_event(&mut self, event: ContentEvent) {
        match event {
            ContentEvent::UrlChanged(url) => {
                self.certificate_error = false;
                self.record_navigation(&url);
                self.committed_url = url;
            }
            ContentEvent::TitleChanged(title) => self.page_title = title,
            ContentEvent::IconChanged(icon) => self.icon = Some(icon),
            ContentEvent::LinkHovered(link) => self.hovered_link = link.filter(|l| !l.is_empty()),
            ContentEvent::CertificateError => {
                // Navigation proceeds; only the frame reflects the error.
                warn!(url = %self.committed_url, "certificate error");
                self.certificate_error = true;
            }
            ContentEvent::FullscreenRequested(on) => self.fullscreen = on,
            ContentEvent::LoadFinished(ok) => {
                debug!(ok, url = %self.committed_url, "load finished");
            }
            ContentEvent::NewWindowRequested { kind, url } => {
                let incognito = self.incognito;
                self.request_window(url, incognito, kind == NewWindowKind::BackgroundTab);
            }
            ContentEvent::DownloadRequested(url) => {
                if let Err(e) = self.downloads.start_download(&url) {
                    warn!(error = %e, "download not started");
                }
            }
        }
    }

    /// Handles every event the content view has queued.
    pub fn pump_events(&mut self) {
        loop {
            let events = self.view.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.handle_event(event);
            }
        }
    }

    /// Appends a committed navigation to history unless incognito.
    fn record_navigation(&self, url: &str) {
        if self.incognito {
            return;
        }
        let Some((scheme, address)) = split_scheme(url) else {
            warn!(url, "committed URL has no scheme, not recorded");
            return;
        };
        if let Err(e) = self.history.append(&scheme, address) {
            warn!(error = %e, "failed to record navigation");
        }
    }

    /// Title shown by the window: the hovered link if any, else the page title.
    pub fn title(&self) -> String {
        let shown = self.hovered_link.as_deref().unwrap_or(&self.page_title);
        if self.incognito {
            format!("{}{}", INCOGNITO_TITLE_PREFIX, shown)
        } else {
            shown.to_string()
        }
    }

    /// Security state shown on the window frame.
    pub fn frame_style(&self) -> FrameStyle {
        match split_scheme(&self.committed_url) {
            Some((scheme, _)) if scheme == "https" => {
                if self.certificate_error {
                    FrameStyle::CertificateError
                } else {
                    FrameStyle::Secure
                }
            }
            _ => FrameStyle::Insecure,
        }
    }

    /// Drains the windows this window asked the application to open.
    pub fn take_requests(&mut self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn is_incognito(&self) -> bool {
        self.incognito
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn icon(&self) -> Option<&[u8]> {
        self.icon.as_deref()
    }

    pub fn committed_url(&self) -> &str {
        &self.committed_url
    }

    pub fn bar(&self) -> &CommandBar {
        &self.bar
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn shortcuts(&self) -> &ShortcutTable {
        &self.shortcuts
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }
}

/// Splits a URL into its lowercased scheme and everything after `scheme:`.
fn split_scheme(url: &str) -> Option<(String, &str)> {
    let scheme = match url::Url::parse(url) {
        Ok(parsed) => parsed.scheme().to_string(),
        Err(_) => {
            let (scheme, _) = url.split_once(':')?;
            if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric()) {
                return None;
            }
            scheme.to_ascii_lowercase()
        }
    };
    let address = url.get(scheme.len() + 1..)?;
    Some((scheme, address))
}
