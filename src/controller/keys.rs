use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::{Controller, Direction};
use crate::bridge::{BridgeError, HostBridge};

/// Keys the launcher window reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Tab,
    F5,
    Char(char),
}

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
}

impl KeyInput {
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
        }
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised key `{0}`")]
pub struct ParseKeyError(String);

/// Parses accelerator-style names such as `ArrowDown`, `Shift+Enter` or
/// `Ctrl+O`.
impl FromStr for KeyInput {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key_name = parts.pop().filter(|name| !name.is_empty());
        let Some(key_name) = key_name else {
            return Err(ParseKeyError(s.to_string()));
        };

        let key = parse_key(key_name).ok_or_else(|| ParseKeyError(s.to_string()))?;
        let mut input = KeyInput::new(key);
        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "shift" => input.shift = true,
                "ctrl" | "control" => input.ctrl = true,
                _ => return Err(ParseKeyError(s.to_string())),
            }
        }
        Ok(input)
    }
}

fn parse_key(name: &str) -> Option<Key> {
    let key = match name {
        "ArrowDown" | "Down" => Key::ArrowDown,
        "ArrowUp" | "Up" => Key::ArrowUp,
        "Enter" | "Return" => Key::Enter,
        "Escape" | "Esc" => Key::Escape,
        "Tab" => Key::Tab,
        "F5" => Key::F5,
        other => {
            let mut chars = other.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            Key::Char(c.to_ascii_lowercase())
        }
    };
    Some(key)
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            other => write!(f, "{other:?}"),
        }
    }
}

impl<B: HostBridge> Controller<B> {
    /// Route a key press. Returns whether the key was consumed; unconsumed
    /// keys belong to the text input.
    pub fn handle_key(&mut self, input: KeyInput) -> Result<bool, BridgeError> {
        let direction = if input.shift {
            Direction::Previous
        } else {
            Direction::Next
        };

        match (input.key, input.ctrl) {
            (Key::ArrowDown, _) => {
                self.on_navigate(Direction::Next);
            }
            (Key::ArrowUp, _) => {
                self.on_navigate(Direction::Previous);
            }
            (Key::Enter, _) => self.on_execute(input.shift)?,
            (Key::Escape, _) => self.on_escape()?,
            (Key::Tab, _) => {
                let cycled = self.config().general.tab_through_action_buttons
                    && self.on_cycle_action(direction).is_some();
                if !cycled {
                    self.on_navigate(direction);
                }
            }
            (Key::Char('o'), true) => self.on_show_in_dir()?,
            (Key::Char('r'), true) | (Key::F5, _) => self.on_refresh_index()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
