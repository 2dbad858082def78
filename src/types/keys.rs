//! Key chords and key sequences.
//!
//! A [`KeyChord`] is one key pressed together with modifiers. A
//! [`KeySequence`] is either a single chord or two chords pressed one after
//! the other (for example `Ctrl+G Ctrl+G`). Both round-trip through the
//! textual form used in settings files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::errors::ShortcutError;

/// A non-modifier key.
///
/// Character keys are stored case-folded to uppercase so that `Ctrl+g` and
/// `Ctrl+G` name the same chord; shift is carried by [`Modifiers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Escape,
    Return,
    Backspace,
    Tab,
    Delete,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    F(u8),
}

impl Key {
    /// Builds a character key, folding letters to uppercase.
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_uppercase())
    }

    fn parse(name: &str) -> Option<Self> {
        let key = match name.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "tab" => Key::Tab,
            "delete" | "del" => Key::Delete,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "pageup" | "pgup" => Key::PageUp,
            "pagedown" | "pgdown" => Key::PageDown,
            "home" => Key::Home,
            "end" => Key::End,
            "plus" => Key::Char('+'),
            "minus" => Key::Char('-'),
            "space" => Key::Char(' '),
            "comma" => Key::Char(','),
            lower => {
                if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                    if (1..=24).contains(&n) {
                        return Some(Key::F(n));
                    }
                    return None;
                }
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char('+') => f.write_str("Plus"),
            Key::Char('-') => f.write_str("Minus"),
            Key::Char(' ') => f.write_str("Space"),
            Key::Char(',') => f.write_str("Comma"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Escape => f.write_str("Escape"),
            Key::Return => f.write_str("Return"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Tab => f.write_str("Tab"),
            Key::Delete => f.write_str("Delete"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::F(n) => write!(f, "F{}", n),
        }
    }
}

/// Modifier keys held while a chord is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    pub const ALT: Modifiers = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };

    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        ..Modifiers::NONE
    };

    /// True when no modifier, or only shift, is held.
    pub fn is_plain(&self) -> bool {
        !self.ctrl && !self.alt && !self.meta
    }
}

/// One key combined with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key pressed without modifiers.
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// A character key pressed with Ctrl.
    pub fn ctrl(c: char) -> Self {
        Self::new(Key::char(c), Modifiers::CTRL)
    }

    /// The text this chord types into an input field, if any.
    ///
    /// Only plain (or shifted) character keys produce text. Letters are
    /// lowercased unless shift is held.
    pub fn text(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if self.modifiers.is_plain() => {
                if self.modifiers.shift {
                    Some(c)
                } else {
                    Some(c.to_ascii_lowercase())
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }
        if self.modifiers.meta {
            f.write_str("Meta+")?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyChord {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ShortcutError::InvalidKeys(s.to_string());
        let s = s.trim();
        if s.is_empty() {
            return Err(invalid());
        }

        let mut parts: Vec<&str> = s.split('+').collect();
        let key_name = parts.pop().ok_or_else(invalid)?;
        let key = Key::parse(key_name).ok_or_else(invalid)?;

        let mut modifiers = Modifiers::NONE;
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "meta" | "cmd" | "super" => modifiers.meta = true,
                _ => return Err(invalid()),
            }
        }
        Ok(KeyChord::new(key, modifiers))
    }
}

/// A shortcut trigger: one chord, or two chords pressed in succession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySequence {
    Single(KeyChord),
    Double(KeyChord, KeyChord),
}

impl KeySequence {
    /// Returns true if this sequence is completed by `current`, given the
    /// chord pressed immediately before it.
    pub fn matches(&self, previous: Option<KeyChord>, current: KeyChord) -> bool {
        match *self {
            KeySequence::Single(chord) => chord == current,
            KeySequence::Double(first, second) => {
                previous == Some(first) && second == current
            }
        }
    }
}

impl From<KeyChord> for KeySequence {
    fn from(chord: KeyChord) -> Self {
        KeySequence::Single(chord)
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySequence::Single(chord) => write!(f, "{}", chord),
            KeySequence::Double(first, second) => write!(f, "{} {}", first, second),
        }
    }
}

impl FromStr for KeySequence {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chords: Vec<&str> = s.split_whitespace().collect();
        match chords.as_slice() {
            [single] => Ok(KeySequence::Single(single.parse()?)),
            [first, second] => Ok(KeySequence::Double(first.parse()?, second.parse()?)),
            _ => Err(ShortcutError::InvalidKeys(s.to_string())),
        }
    }
}
