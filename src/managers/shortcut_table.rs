//! Shortcut table for keyweb.
//!
//! An ordered list of key sequences bound to window actions. Lookup walks the
//! list in registration order and the first binding completed by the current
//! chord wins, whether it is a single chord or a two-chord sequence.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::errors::ShortcutError;
use crate::types::keys::{Key, KeyChord, KeySequence, Modifiers};

/// Something a window does in response to a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Forward,
    Back,
    Reload,
    ToggleBar,
    Find,
    ScrollDown,
    ScrollUp,
    ScrollRight,
    ScrollLeft,
    PageDown,
    PageUp,
    ScrollTop,
    ScrollBottom,
    FindNext,
    FindPrevious,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    NewWindow,
    NewIncognitoWindow,
    ExitFullscreen,
}

impl Action {
    pub const ALL: [Action; 21] = [
        Action::Forward,
        Action::Back,
        Action::Reload,
        Action::ToggleBar,
        Action::Find,
        Action::ScrollDown,
        Action::ScrollUp,
        Action::ScrollRight,
        Action::ScrollLeft,
        Action::PageDown,
        Action::PageUp,
        Action::ScrollTop,
        Action::ScrollBottom,
        Action::FindNext,
        Action::FindPrevious,
        Action::ZoomIn,
        Action::ZoomOut,
        Action::ZoomReset,
        Action::NewWindow,
        Action::NewIncognitoWindow,
        Action::ExitFullscreen,
    ];

    /// Name used for the action in settings files.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Forward => "forward",
            Action::Back => "back",
            Action::Reload => "reload",
            Action::ToggleBar => "toggle_bar",
            Action::Find => "find",
            Action::ScrollDown => "scroll_down",
            Action::ScrollUp => "scroll_up",
            Action::ScrollRight => "scroll_right",
            Action::ScrollLeft => "scroll_left",
            Action::PageDown => "page_down",
            Action::PageUp => "page_up",
            Action::ScrollTop => "scroll_top",
            Action::ScrollBottom => "scroll_bottom",
            Action::FindNext => "find_next",
            Action::FindPrevious => "find_previous",
            Action::ZoomIn => "zoom_in",
            Action::ZoomOut => "zoom_out",
            Action::ZoomReset => "zoom_reset",
            Action::NewWindow => "new_window",
            Action::NewIncognitoWindow => "new_incognito_window",
            Action::ExitFullscreen => "exit_fullscreen",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| ShortcutError::UnknownAction(s.to_string()))
    }
}

/// Ordered (key sequence, action) bindings for one window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortcutTable {
    bindings: Vec<(KeySequence, Action)>,
}

impl ShortcutTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in bindings.
    pub fn with_defaults() -> Self {
        let ctrl = KeyChord::ctrl;
        let ctrl_shift = |c| KeyChord::new(Key::char(c), Modifiers::CTRL_SHIFT);
        let alt = |k| KeyChord::new(k, Modifiers::ALT);
        let plain = KeyChord::plain;

        let mut table = Self::new();
        table.register(ctrl('i'), Action::Forward);
        table.register(alt(Key::Right), Action::Forward);
        table.register(ctrl('o'), Action::Back);
        table.register(alt(Key::Left), Action::Back);
        table.register(ctrl('r'), Action::Reload);

        table.register(ctrl(':'), Action::ToggleBar);
        table.register(ctrl_shift(':'), Action::ToggleBar);
        table.register(ctrl('/'), Action::Find);

        table.register(ctrl('j'), Action::ScrollDown);
        table.register(ctrl('k'), Action::ScrollUp);
        table.register(ctrl('l'), Action::ScrollRight);
        table.register(ctrl('h'), Action::ScrollLeft);
        table.register(plain(Key::PageDown), Action::PageDown);
        table.register(plain(Key::PageUp), Action::PageUp);
        table.register(KeySequence::Double(ctrl('g'), ctrl('g')), Action::ScrollTop);
        table.register(plain(Key::Home), Action::ScrollTop);
        table.register(ctrl_shift('g'), Action::ScrollBottom);
        table.register(plain(Key::End), Action::ScrollBottom);

        table.register(ctrl('n'), Action::FindNext);
        table.register(ctrl('p'), Action::FindPrevious);

        table.register(ctrl('+'), Action::ZoomIn);
        table.register(ctrl_shift('+'), Action::ZoomIn);
        table.register(ctrl('-'), Action::ZoomOut);
        table.register(ctrl('0'), Action::ZoomReset);

        table.register(ctrl_shift('n'), Action::NewWindow);
        table.register(ctrl_shift('p'), Action::NewIncognitoWindow);

        table.register(ctrl('['), Action::ExitFullscreen);
        table.register(plain(Key::Escape), Action::ExitFullscreen);
        table
    }

    /// The built-in bindings with settings overrides applied.
    ///
    /// `overrides` maps action names to key sequence strings.
    pub fn from_overrides(overrides: &HashMap<String, String>) -> Result<Self, ShortcutError> {
        let mut table = Self::with_defaults();
        let mut entries: Vec<(&String, &String)> = overrides.iter().collect();
        entries.sort();
        for (name, keys) in entries {
            let action: Action = name.parse()?;
            let keys: KeySequence = keys.parse()?;
            table.rebind(action, keys);
        }
        Ok(table)
    }

    /// Appends a binding. Earlier bindings take precedence.
    pub fn register(&mut self, keys: impl Into<KeySequence>, action: Action) {
        self.bindings.push((keys.into(), action));
    }

    /// Replaces every binding of `action` with a single binding to `keys`,
    /// kept at the position of the action's first binding.
    ///
    /// An action with no binding yet is appended.
    pub fn rebind(&mut self, action: Action, keys: KeySequence) {
        match self.bindings.iter().position(|(_, a)| *a == action) {
            Some(first) => {
                self.bindings[first].0 = keys;
                let mut index = 0;
                self.bindings.retain(|(_, a)| {
                    let keep = *a != action || index == first;
                    index += 1;
                    keep
                });
            }
            None => self.register(keys, action),
        }
    }

    /// Finds the first binding completed by `current`, given the chord
    /// pressed before it.
    pub fn dispatch(&self, previous: Option<KeyChord>, current: KeyChord) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(keys, _)| keys.matches(previous, current))
            .map(|(_, action)| *action)
    }

    /// Key sequences bound to `action`, in registration order.
    pub fn keys_for(&self, action: Action) -> Vec<KeySequence> {
        self.bindings
            .iter()
            .filter(|(_, a)| *a == action)
            .map(|(keys, _)| *keys)
            .collect()
    }

    pub fn bindings(&self) -> &[(KeySequence, Action)] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
