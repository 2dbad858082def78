//! The contract between a browser window and the engine that renders pages.
//!
//! Rendering, networking and script execution belong to the engine. The
//! window only issues commands through [`ContentView`] and consumes the
//! [`ContentEvent`]s the engine reports back via [`ContentView::take_events`].

use std::collections::VecDeque;

use tracing::debug;

use crate::types::content::ContentEvent;
use crate::types::query::FindDirection;

/// Commands and queries a window issues to its content view.
pub trait ContentView {
    fn navigate(&mut self, url: &str);
    fn reload(&mut self);
    fn go_back(&mut self);
    fn go_forward(&mut self);
    /// Highlights `query` on the page; an empty query clears highlights.
    fn find_text(&mut self, query: &str, direction: FindDirection);
    fn zoom_factor(&self) -> f64;
    fn set_zoom_factor(&mut self, factor: f64);
    fn run_script(&mut self, code: &str);
    /// The URL of the committed page, empty before the first navigation.
    fn url(&self) -> String;
    fn title(&self) -> String;
    /// Moves keyboard focus to the page.
    fn focus(&mut self);
    /// Drains events reported since the last call, oldest first.
    fn take_events(&mut self) -> Vec<ContentEvent> {
        Vec::new()
    }
}

/// A command received by a [`HeadlessView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    Navigate(String),
    Reload,
    Back,
    Forward,
    Find { query: String, direction: FindDirection },
    SetZoom(f64),
    RunScript(String),
    Focus,
}

/// A content view without a rendering engine.
///
/// Every command is recorded. Navigation commits immediately: the view
/// reports `UrlChanged`, `TitleChanged` (the URL stands in for the title)
/// and `LoadFinished`, and keeps back/forward stacks so history
/// navigation behaves like a real engine.
#[derive(Debug)]
pub struct HeadlessView {
    url: String,
    title: String,
    zoom: f64,
    focused: bool,
    back: Vec<String>,
    forward: Vec<String>,
    commands: Vec<ViewCommand>,
    events: VecDeque<ContentEvent>,
}

impl Default for HeadlessView {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessView {
    pub fn new() -> Self {
        Self {
            url: String::new(),
            title: String::new(),
            zoom: 1.0,
            focused: false,
            back: Vec::new(),
            forward: Vec::new(),
            commands: Vec::new(),
            events: VecDeque::new(),
        }
    }

    /// Every command received so far.
    pub fn commands(&self) -> &[ViewCommand] {
        &self.commands
    }

    /// Forgets recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// The most recent navigation target, if any.
    pub fn last_navigation(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            ViewCommand::Navigate(url) => Some(url.as_str()),
            _ => None,
        })
    }

    /// The most recent find query, if any.
    pub fn last_find(&self) -> Option<(&str, FindDirection)> {
        self.commands.iter().rev().find_map(|c| match c {
            ViewCommand::Find { query, direction } => Some((query.as_str(), *direction)),
            _ => None,
        })
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Queues an event as if the engine had reported it.
    pub fn push_event(&mut self, event: ContentEvent) {
        self.events.push_back(event);
    }

    fn commit(&mut self, url: String) {
        debug!(url = %url, "headless view committed");
        self.url = url.clone();
        self.title = url.clone();
        self.events.push_back(ContentEvent::UrlChanged(url.clone()));
        self.events.push_back(ContentEvent::TitleChanged(url));
        self.events.push_back(ContentEvent::LoadFinished(true));
    }
}

impl ContentView for HeadlessView {
    fn navigate(&mut self, url: &str) {
        self.commands.push(ViewCommand::Navigate(url.to_string()));
        if !self.url.is_empty() {
            self.back.push(self.url.clone());
        }
        self.forward.clear();
        self.commit(url.to_string());
    }

    fn reload(&mut self) {
        self.commands.push(ViewCommand::Reload);
        if !self.url.is_empty() {
            self.events.push_back(ContentEvent::LoadFinished(true));
        }
    }

    fn go_back(&mut self) {
        self.commands.push(ViewCommand::Back);
        if let Some(previous) = self.back.pop() {
            self.forward.push(self.url.clone());
            self.commit(previous);
        }
    }

    fn go_forward(&mut self) {
        self.commands.push(ViewCommand::Forward);
        if let Some(next) = self.forward.pop() {
            self.back.push(self.url.clone());
            self.commit(next);
        }
    }

    fn find_text(&mut self, query: &str, direction: FindDirection) {
        self.commands.push(ViewCommand::Find {
            query: query.to_string(),
            direction,
        });
    }

    fn zoom_factor(&self) -> f64 {
        self.zoom
    }

    fn set_zoom_factor(&mut self, factor: f64) {
        self.commands.push(ViewCommand::SetZoom(factor));
        self.zoom = factor;
    }

    fn run_script(&mut self, code: &str) {
        self.commands.push(ViewCommand::RunScript(code.to_string()));
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn focus(&mut self) {
        self.commands.push(ViewCommand::Focus);
        self.focused = true;
    }

    fn take_events(&mut self) -> Vec<ContentEvent> {
        self.events.drain(..).collect()
    }
}
