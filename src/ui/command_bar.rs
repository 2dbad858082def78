//! The command bar: a single-line text field with inline completion and a
//! dropdown of suggestions.
//!
//! The bar is either hidden or being edited. While editing, every text change
//! is classified; non-find text is completed inline from history and the
//! suggestion list is rebuilt. Committing or cancelling is reported to the
//! owning window, which decides what happens next.
//!
//! Editing is append-only: the cursor always sits at the end of the text and
//! typing replaces the selected completion, if any.

use std::ops::Range;

use crate::managers::history_store::HistoryStoreTrait;
use crate::services::{path_expander, query_classifier};
use crate::types::keys::{Key, KeyChord};
use crate::types::query::{QueryIntent, FIND_PREFIX, SEARCH_PREFIX};

/// Visibility of the command bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarState {
    Hidden,
    Editing,
}

/// What the bar did with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarKeyOutcome {
    /// The key was consumed by the bar.
    Handled,
    /// Return was pressed; carries the text to act on.
    Committed(String),
    /// The bar was closed.
    Closed,
    /// The bar has no use for the key.
    Unhandled,
}

/// Ordered suggestion rows with an optional highlighted row.
///
/// Moving the highlight clamps at both ends of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionList {
    items: Vec<String>,
    selected: Option<usize>,
    visible: bool,
    max_rows: usize,
}

impl SuggestionList {
    pub fn new(max_rows: usize) -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            visible: false,
            max_rows,
        }
    }

    /// Replaces the rows, clears the highlight and shows the list.
    fn show(&mut self, items: Vec<String>) {
        self.items = items;
        self.selected = None;
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    /// Highlights the next row. With nothing highlighted, the first row.
    fn select_next(&mut self) -> Option<&str> {
        if self.items.is_empty() {
            return None;
        }
        let next = match self.selected {
            None => 0,
            Some(i) => (i + 1).min(self.items.len() - 1),
        };
        self.selected = Some(next);
        Some(&self.items[next])
    }

    /// Highlights the previous row. With nothing highlighted, nothing happens.
    fn select_previous(&mut self) -> Option<&str> {
        let previous = self.selected?.saturating_sub(1);
        self.selected = Some(previous);
        Some(&self.items[previous])
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of rows the dropdown shows at once.
    pub fn visible_rows(&self) -> usize {
        self.items.len().min(self.max_rows)
    }
}

/// Text field state for one window.
#[derive(Debug, Clone)]
pub struct CommandBar {
    state: BarState,
    text: String,
    selection: Option<Range<usize>>,
    previous_text: String,
    suggestions: SuggestionList,
}

impl CommandBar {
    pub fn new(max_rows: usize) -> Self {
        Self {
            state: BarState::Hidden,
            text: String::new(),
            selection: None,
            previous_text: String::new(),
            suggestions: SuggestionList::new(max_rows),
        }
    }

    /// Shows the bar with `prefix + content`, selecting `content`.
    pub fn open(&mut self, prefix: &str, content: &str) {
        self.text = format!("{}{}", prefix, content);
        self.selection = Some(prefix.len()..self.text.len());
        self.state = BarState::Editing;
        self.previous_text.clear();
    }

    /// Hides the bar and its suggestions and clears the text.
    pub fn close(&mut self) {
        self.suggestions.hide();
        self.state = BarState::Hidden;
        self.text.clear();
        self.selection = None;
        self.previous_text.clear();
    }

    /// Hides the suggestion list and reports the text to act on.
    pub fn commit(&mut self) -> String {
        self.suggestions.hide();
        self.text.clone()
    }

    /// Hides the suggestion list, keeping the bar open.
    pub fn hide_suggestions(&mut self) {
        self.suggestions.hide();
    }

    /// Reacts to the user changing the text to `text`.
    ///
    /// Find queries leave the suggestions untouched. Anything else is
    /// completed inline from history, unless the user is deleting, and the
    /// suggestion list is rebuilt from the typed text.
    pub fn on_text_edited<H: HistoryStoreTrait + ?Sized>(&mut self, text: &str, history: &H) {
        self.text = text.to_string();
        self.selection = None;

        if text.is_empty() {
            self.suggestions.hide();
            self.previous_text.clear();
            return;
        }

        let intent = query_classifier::classify(text);
        if intent == QueryIntent::InPageSearch {
            self.previous_text = text.to_string();
            return;
        }

        let matched = history.first_forward_match(text);
        if !self.previous_text.starts_with(text) && !matched.is_empty() {
            let suffix: String = matched.chars().skip(text.chars().count()).collect();
            self.open(text, &suffix);
        }
        self.previous_text = text.to_string();

        self.suggestions.show(Self::build_suggestions(text, intent, history));
    }

    fn build_suggestions<H: HistoryStoreTrait + ?Sized>(
        word: &str,
        intent: QueryIntent,
        history: &H,
    ) -> Vec<String> {
        let mut list = Vec::new();
        match intent {
            QueryIntent::Search { with_scheme: false } => {
                list.push(format!("{}{}", SEARCH_PREFIX, word));
                list.push(format!("http://{}", word));
            }
            QueryIntent::NavigateUrl { with_scheme: false } => {
                list.push(format!("http://{}", word));
                list.push(format!("{}{}", SEARCH_PREFIX, word));
            }
            _ => {}
        }

        if path_expander::looks_like_path(word) {
            list.push(path_expander::file_url(word));
        }

        list.push(format!("{}{}", FIND_PREFIX, word));

        let tokens: Vec<String> = word.split_whitespace().map(str::to_string).collect();
        list.extend(history.search(&tokens));
        list
    }

    /// Types `s` at the end of the text, replacing the selection.
    pub fn insert_text<H: HistoryStoreTrait + ?Sized>(&mut self, s: &str, history: &H) {
        let mut text = self.unselected_text();
        text.push_str(s);
        self.on_text_edited(&text, history);
    }

    /// Deletes the selection, or the last character when nothing is selected.
    pub fn backspace<H: HistoryStoreTrait + ?Sized>(&mut self, history: &H) {
        let text = match &self.selection {
            Some(range) if !range.is_empty() => self.unselected_text(),
            _ => {
                let mut text = self.text.clone();
                text.pop();
                text
            }
        };
        self.on_text_edited(&text, history);
    }

    /// Keeps the selected inline completion as typed text.
    pub fn accept_completion(&mut self) {
        self.selection = None;
    }

    /// Handles the keys the bar owns: closing, committing and moving the
    /// suggestion highlight.
    pub fn handle_key(&mut self, chord: KeyChord) -> BarKeyOutcome {
        if self.state == BarState::Hidden {
            return BarKeyOutcome::Unhandled;
        }

        if chord == KeyChord::plain(Key::Escape) || chord == KeyChord::ctrl('[') {
            self.close();
            return BarKeyOutcome::Closed;
        }
        if chord == KeyChord::plain(Key::Return) {
            return BarKeyOutcome::Committed(self.commit());
        }

        if self.suggestions.is_visible() {
            if chord == KeyChord::plain(Key::Down) || chord == KeyChord::ctrl('n') {
                self.select_next();
                return BarKeyOutcome::Handled;
            }
            if chord == KeyChord::plain(Key::Up) || chord == KeyChord::ctrl('p') {
                self.select_previous();
                return BarKeyOutcome::Handled;
            }
        }
        BarKeyOutcome::Unhandled
    }

    /// Applies an editing key. Returns false if the key does not edit text.
    pub fn edit_key<H: HistoryStoreTrait + ?Sized>(&mut self, chord: KeyChord, history: &H) -> bool {
        if self.state == BarState::Hidden {
            return false;
        }
        match chord.key {
            Key::Backspace if chord.modifiers.is_plain() => {
                self.backspace(history);
                true
            }
            // Plain End is a page shortcut, so only Right accepts.
            Key::Right if chord.modifiers.is_plain() => {
                self.accept_completion();
                true
            }
            _ => match chord.text() {
                Some(c) => {
                    self.insert_text(c.encode_utf8(&mut [0; 4]), history);
                    true
                }
                None => false,
            },
        }
    }

    /// Moves the highlight down and copies the row into the text.
    pub fn select_next(&mut self) {
        if let Some(row) = self.suggestions.select_next().map(str::to_string) {
            self.set_text_from_row(row);
        }
    }

    /// Moves the highlight up and copies the row into the text.
    pub fn select_previous(&mut self) {
        if let Some(row) = self.suggestions.select_previous().map(str::to_string) {
            self.set_text_from_row(row);
        }
    }

    fn set_text_from_row(&mut self, row: String) {
        self.text = row;
        self.selection = None;
    }

    fn unselected_text(&self) -> String {
        match &self.selection {
            Some(range) => {
                let mut text = self.text.clone();
                text.replace_range(range.clone(), "");
                text
            }
            None => self.text.clone(),
        }
    }

    pub fn state(&self) -> BarState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == BarState::Editing
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte range of the selected text, if any.
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    pub fn selected_text(&self) -> &str {
        match &self.selection {
            Some(range) => &self.text[range.clone()],
            None => "",
        }
    }

    pub fn suggestions(&self) -> &SuggestionList {
        &self.suggestions
    }
}
