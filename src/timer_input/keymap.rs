//! Key bindings for the timer input component.

use crate::key::{Binding, Input};
use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// KeyMap is the key bindings for the actions of a timer input.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Move the selection one digit right.
    pub select_next: Binding,
    /// Move the selection one digit left.
    pub select_previous: Binding,
    /// Delete the digit at the selection.
    pub backspace: Binding,
    /// Start the countdown from the entered duration.
    pub confirm: Binding,
    /// The start button: start when idle, otherwise pause or unpause.
    pub start_pause: Binding,
    /// The reset button: stop a started countdown, otherwise clear the input.
    pub reset: Binding,
}

impl KeyMap {
    /// Maps a key message to a cursor input. Digit keys always map to
    /// [`Input::Digit`]; the button bindings are not inputs and return
    /// `None`.
    pub fn resolve(&self, key_msg: &KeyMsg) -> Option<Input> {
        if self.select_next.matches(key_msg) {
            Some(Input::Next)
        } else if self.select_previous.matches(key_msg) {
            Some(Input::Previous)
        } else if self.backspace.matches(key_msg) {
            Some(Input::Backspace)
        } else if self.confirm.matches(key_msg) {
            Some(Input::Confirm)
        } else if let KeyCode::Char(c) = key_msg.key {
            Input::from_char(c)
        } else {
            None
        }
    }
}

/// DefaultKeyMap is the default set of key bindings for a timer input.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        select_next: Binding::new(vec![KeyCode::Right])
            .with_help("→")
            .with_description("next digit"),
        select_previous: Binding::new(vec![KeyCode::Left])
            .with_help("←")
            .with_description("previous digit"),
        backspace: Binding::new(vec![KeyCode::Backspace])
            .with_help("backspace")
            .with_description("delete digit"),
        confirm: Binding::new(vec![KeyCode::Enter])
            .with_help("enter")
            .with_description("start"),
        start_pause: Binding::new(vec![KeyCode::Char(' ')])
            .with_help("space")
            .with_description("start/pause"),
        reset: Binding::new(vec![KeyCode::Esc, KeyCode::Delete])
            .with_help("esc")
            .with_description("reset"),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}
