//! Key bindings and the abstract inputs a timer input understands.

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// A set of keys that trigger one action, with help text.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Keys that trigger the binding.
    pub keys: Vec<KeyCode>,
    /// Short key label, e.g. `"←"`.
    pub help: String,
    /// What the binding does.
    pub description: String,
}

impl Binding {
    /// Creates a binding without help text.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: String::new(),
            description: String::new(),
        }
    }

    /// Sets the key label.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether the key message triggers this binding.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        self.keys.contains(&key_msg.key)
    }
}

/// Abstract input fed into a timer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Move the selection right.
    Next,
    /// Move the selection left.
    Previous,
    /// Delete the digit at the selection.
    Backspace,
    /// Start the countdown.
    Confirm,
    /// Type a digit, `0..=9`.
    Digit(u8),
}

impl Input {
    /// Parses host key names: `ArrowRight`, `ArrowLeft`, `Backspace`,
    /// `Enter` and single digits. Anything else is `None`.
    pub fn from_key_name(name: &str) -> Option<Input> {
        match name {
            "ArrowRight" => Some(Input::Next),
            "ArrowLeft" => Some(Input::Previous),
            "Backspace" => Some(Input::Backspace),
            "Enter" => Some(Input::Confirm),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Input::from_char(c),
                    _ => None,
                }
            }
        }
    }

    /// A digit input for an ASCII digit character.
    pub fn from_char(c: char) -> Option<Input> {
        c.to_digit(10).map(|d| Input::Digit(d as u8))
    }
}
