//! Unit tests for the browser window controller, driven through a
//! `HeadlessView`.

use std::rc::Rc;
use std::time::Duration;

use keyweb::managers::history_store::HistoryStore;
use keyweb::types::content::{ContentEvent, FrameStyle, NewWindowKind, WindowRequest};
use keyweb::types::keys::{Key, KeyChord, Modifiers};
use keyweb::types::query::FindDirection;
use keyweb::types::settings::BrowserSettings;
use keyweb::ui::browser_window::BrowserWindow;
use keyweb::ui::content_view::{ContentView, HeadlessView, ViewCommand};

fn window_with(settings: &BrowserSettings, incognito: bool) -> BrowserWindow<HeadlessView> {
    let history = Rc::new(HistoryStore::open_in_memory().expect("in-memory history"));
    BrowserWindow::new(HeadlessView::new(), history, settings, incognito)
}

fn window() -> BrowserWindow<HeadlessView> {
    window_with(&BrowserSettings::default(), false)
}

fn ctrl_shift(c: char) -> KeyChord {
    KeyChord::new(Key::char(c), Modifiers::CTRL_SHIFT)
}

fn last_script(window: &BrowserWindow<HeadlessView>) -> Option<String> {
    window.view().commands().iter().rev().find_map(|c| match c {
        ViewCommand::RunScript(code) => Some(code.clone()),
        _ => None,
    })
}

// === Query resolution ===

#[test]
fn test_bare_host_expands_to_http() {
    let mut w = window();
    w.resolve_and_load("example.com");
    assert_eq!(w.view().last_navigation(), Some("http://example.com"));
}

#[test]
fn test_bare_host_uses_recorded_scheme() {
    let mut w = window();
    w.history().append_at(1, "https", "//www.example.com").unwrap();

    w.resolve_and_load("example.com");
    assert_eq!(w.view().last_navigation(), Some("https://www.example.com"));
}

#[test]
fn test_address_with_scheme_loads_verbatim() {
    let mut w = window();
    w.resolve_and_load("https://docs.rs/regex");
    assert_eq!(w.view().last_navigation(), Some("https://docs.rs/regex"));
}

#[test]
fn test_plain_text_searches_the_web() {
    let mut w = window();
    w.resolve_and_load("hello world");

    assert_eq!(
        w.view().last_navigation(),
        Some("https://google.com/search?q=hello+world")
    );
    let records = w.history().records().unwrap();
    assert_eq!(records[0].scheme, "search");
    assert_eq!(records[0].address, "hello world");
}

#[test]
fn test_search_prefix_is_stripped() {
    let mut w = window();
    w.resolve_and_load("search:example.com");

    assert_eq!(
        w.view().last_navigation(),
        Some("https://google.com/search?q=example.com")
    );
    assert_eq!(w.history().records().unwrap()[0].address, "example.com");
}

#[test]
fn test_search_url_encodes_query() {
    let mut settings = BrowserSettings::default();
    settings.search.url = "https://duckduckgo.com/".to_string();
    let w = window_with(&settings, false);

    assert_eq!(w.search_url("a&b c"), "https://duckduckgo.com/?q=a%26b+c");
}

#[test]
fn test_find_query_searches_page_and_keeps_bar_open() {
    let mut w = window();
    w.open_bar("find:", "");
    w.text_edited("find:needle");
    assert_eq!(w.view().last_find(), Some(("needle", FindDirection::Forward)));

    w.commit("find:needle");
    assert!(w.bar().is_visible());
    assert_eq!(w.view().last_navigation(), None);
}

#[test]
fn test_non_find_text_clears_highlights() {
    let mut w = window();
    w.in_page_search("example", FindDirection::Backward);
    assert_eq!(w.view().last_find(), Some(("", FindDirection::Backward)));
}

#[test]
fn test_click_outside_hides_suggestions_only() {
    let mut w = window();
    w.open_bar("", "");
    w.text_edited("zebra");
    assert!(w.bar().suggestions().is_visible());

    w.click_outside_suggestions();
    assert!(!w.bar().suggestions().is_visible());
    assert!(w.bar().is_visible());
    assert_eq!(w.bar().text(), "zebra");
}

#[test]
fn test_commit_closes_bar_and_focuses_page() {
    let mut w = window();
    w.open_bar("", "");
    w.commit("example.com");

    assert!(!w.bar().is_visible());
    assert!(w.view().has_focus());
}

// === History recording ===

#[test]
fn test_committed_navigation_is_recorded() {
    let mut w = window();
    w.resolve_and_load("https://example.com/page");
    w.pump_events();

    assert_eq!(w.committed_url(), "https://example.com/page");
    let records = w.history().records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].scheme, "https");
    assert_eq!(records[0].address, "//example.com/page");
}

#[test]
fn test_web_search_records_query_and_results_page() {
    let mut w = window();
    w.resolve_and_load("hello world");
    w.pump_events();

    let records = w.history().records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!((records[0].scheme.as_str(), records[0].address.as_str()), ("search", "hello world"));
    assert_eq!(
        (records[1].scheme.as_str(), records[1].address.as_str()),
        ("https", "//google.com/search?q=hello+world")
    );
}

#[test]
fn test_incognito_records_nothing() {
    let mut w = window_with(&BrowserSettings::default(), true);
    w.resolve_and_load("hello world");
    w.resolve_and_load("https://example.com");
    w.pump_events();

    assert!(w.history().is_empty());
    assert!(w.title().starts_with("incognito: "));
}

// === Shortcuts ===

#[test]
fn test_scroll_shortcuts_use_configured_step() {
    let mut w = window();
    assert!(w.handle_key(KeyChord::ctrl('j')));
    assert_eq!(last_script(&w).as_deref(), Some("window.scrollBy(0, 40)"));

    assert!(w.handle_key(KeyChord::ctrl('h')));
    assert_eq!(last_script(&w).as_deref(), Some("window.scrollBy(-40, 0)"));
}

#[test]
fn test_double_ctrl_g_scrolls_to_top() {
    let mut w = window();
    assert!(!w.handle_key(KeyChord::ctrl('g')));
    assert!(w.handle_key(KeyChord::ctrl('g')));
    assert_eq!(last_script(&w).as_deref(), Some("window.scrollTo(0, 0);"));
}

#[test]
fn test_interrupted_sequence_does_not_fire() {
    let mut w = window();
    w.handle_key(KeyChord::ctrl('g'));
    w.handle_key(KeyChord::ctrl('j'));
    w.view_mut().clear_commands();

    assert!(!w.handle_key(KeyChord::ctrl('g')));
    assert!(last_script(&w).is_none());
}

#[test]
fn test_chord_timeout_forgets_first_chord() {
    let mut settings = BrowserSettings::default();
    settings.input.chord_timeout_ms = Some(1);
    let mut w = window_with(&settings, false);

    w.handle_key(KeyChord::ctrl('g'));
    std::thread::sleep(Duration::from_millis(20));
    assert!(!w.handle_key(KeyChord::ctrl('g')));
}

#[test]
fn test_zoom_shortcuts() {
    let mut w = window();
    w.handle_key("Ctrl+Plus".parse().unwrap());
    assert!((w.view().zoom_factor() - 1.1).abs() < 1e-9);

    w.handle_key("Ctrl+Minus".parse().unwrap());
    w.handle_key("Ctrl+Minus".parse().unwrap());
    assert!((w.view().zoom_factor() - 0.9).abs() < 1e-9);

    w.handle_key(KeyChord::ctrl('0'));
    assert_eq!(w.view().zoom_factor(), 1.0);
}

#[test]
fn test_back_and_forward_shortcuts() {
    let mut w = window();
    w.resolve_and_load("https://a.example.com");
    w.resolve_and_load("https://b.example.com");
    w.pump_events();

    w.handle_key(KeyChord::ctrl('o'));
    w.pump_events();
    assert_eq!(w.committed_url(), "https://a.example.com");

    w.handle_key(KeyChord::new(Key::Right, Modifiers::ALT));
    w.pump_events();
    assert_eq!(w.committed_url(), "https://b.example.com");
}

#[test]
fn test_toggle_bar_shows_current_url() {
    let mut w = window();
    w.resolve_and_load("https://example.com/");
    w.pump_events();

    w.handle_key(KeyChord::ctrl(':'));
    assert!(w.bar().is_visible());
    assert_eq!(w.bar().text(), "https://example.com/");
    assert_eq!(w.bar().selected_text(), "https://example.com/");

    w.perform(keyweb::managers::shortcut_table::Action::ToggleBar);
    assert!(!w.bar().is_visible());
}

#[test]
fn test_find_shortcut_opens_and_closes_find_bar() {
    let mut w = window();
    w.handle_key(KeyChord::ctrl('/'));
    assert!(w.bar().is_visible());
    assert_eq!(w.bar().text(), "find:");

    w.handle_key(KeyChord::ctrl('/'));
    assert!(!w.bar().is_visible());
}

#[test]
fn test_find_next_and_previous() {
    let mut w = window();
    w.open_bar("find:", "");
    w.text_edited("find:foo");

    w.handle_key(KeyChord::ctrl('p'));
    assert_eq!(w.view().last_find(), Some(("foo", FindDirection::Backward)));
    w.handle_key(KeyChord::ctrl('n'));
    assert_eq!(w.view().last_find(), Some(("foo", FindDirection::Forward)));
}

#[test]
fn test_escape_closes_bar_before_leaving_fullscreen() {
    let mut w = window();
    w.open_bar("", "x");
    w.handle_key(KeyChord::plain(Key::Escape));
    assert!(!w.bar().is_visible());
    assert!(last_script(&w).is_none());

    w.handle_key(KeyChord::plain(Key::Escape));
    assert_eq!(last_script(&w).as_deref(), Some("document.webkitExitFullscreen()"));
}

#[test]
fn test_typing_goes_to_open_bar() {
    let mut w = window();
    w.history().append_at(1, "https", "//example.com").unwrap();
    w.open_bar("", "");

    assert!(w.handle_key(KeyChord::plain(Key::char('e'))));
    assert_eq!(w.bar().text(), "example.com");

    w.handle_key(KeyChord::plain(Key::Right));
    w.handle_key(KeyChord::plain(Key::Return));
    assert_eq!(w.view().last_navigation(), Some("https://example.com"));
    assert!(!w.bar().is_visible());
}

#[test]
fn test_selected_suggestion_is_committed() {
    let mut w = window();
    w.open_bar("", "");
    w.text_edited("zebra");
    w.handle_key(KeyChord::plain(Key::Down));
    w.handle_key(KeyChord::plain(Key::Return));

    assert_eq!(
        w.view().last_navigation(),
        Some("https://google.com/search?q=zebra")
    );
}

#[test]
fn test_new_window_shortcuts_queue_requests() {
    let mut w = window();
    w.handle_key(ctrl_shift('n'));
    w.handle_key(ctrl_shift('p'));

    assert_eq!(
        w.take_requests(),
        vec![
            WindowRequest { url: None, incognito: false, background: false },
            WindowRequest { url: None, incognito: true, background: false },
        ]
    );
    assert!(w.take_requests().is_empty());
}

#[test]
fn test_shortcut_overrides_apply() {
    let mut settings = BrowserSettings::default();
    settings.shortcuts.insert("reload".to_string(), "F5".to_string());
    let mut w = window_with(&settings, false);

    assert!(w.handle_key(KeyChord::plain(Key::F(5))));
    assert_eq!(w.view().commands().last(), Some(&ViewCommand::Reload));
}

#[test]
fn test_bad_shortcut_overrides_fall_back_to_defaults() {
    let mut settings = BrowserSettings::default();
    settings.shortcuts.insert("reload".to_string(), "Hyper+R".to_string());
    let w = window_with(&settings, false);

    assert_eq!(
        w.shortcuts().dispatch(None, KeyChord::ctrl('r')),
        Some(keyweb::managers::shortcut_table::Action::Reload)
    );
}

// === Content events ===

#[test]
fn test_page_opened_windows_inherit_incognito() {
    let mut w = window_with(&BrowserSettings::default(), true);
    w.handle_event(ContentEvent::NewWindowRequested {
        kind: NewWindowKind::BackgroundTab,
        url: Some("https://example.com/popup".to_string()),
    });

    assert_eq!(
        w.take_requests(),
        vec![WindowRequest {
            url: Some("https://example.com/popup".to_string()),
            incognito: true,
            background: true,
        }]
    );
}

#[test]
fn test_hovered_link_replaces_title() {
    let mut w = window();
    w.handle_event(ContentEvent::TitleChanged("Example".to_string()));
    assert_eq!(w.title(), "Example");

    w.handle_event(ContentEvent::LinkHovered(Some("https://example.com/next".to_string())));
    assert_eq!(w.title(), "https://example.com/next");

    w.handle_event(ContentEvent::LinkHovered(None));
    assert_eq!(w.title(), "Example");
}

#[test]
fn test_frame_style_tracks_security() {
    let mut w = window();
    assert_eq!(w.frame_style(), FrameStyle::Insecure);

    w.resolve_and_load("https://example.com");
    w.pump_events();
    assert_eq!(w.frame_style(), FrameStyle::Secure);

    w.handle_event(ContentEvent::CertificateError);
    assert_eq!(w.frame_style(), FrameStyle::CertificateError);

    w.resolve_and_load("http://example.com");
    w.pump_events();
    assert_eq!(w.frame_style(), FrameStyle::Insecure);
}

#[test]
fn test_fullscreen_and_icon_events() {
    let mut w = window();
    w.handle_event(ContentEvent::FullscreenRequested(true));
    assert!(w.is_fullscreen());
    w.handle_event(ContentEvent::FullscreenRequested(false));
    assert!(!w.is_fullscreen());

    w.handle_event(ContentEvent::IconChanged(vec![0x89, 0x50]));
    assert_eq!(w.icon(), Some(&[0x89, 0x50][..]));
}

#[test]
fn test_failed_download_is_not_fatal() {
    let mut settings = BrowserSettings::default();
    settings.downloads.helper = "/nonexistent/keyweb-download-helper".to_string();
    let mut w = window_with(&settings, false);

    w.handle_event(ContentEvent::DownloadRequested("https://example.com/file.zip".to_string()));
    assert!(w.take_requests().is_empty());
}
