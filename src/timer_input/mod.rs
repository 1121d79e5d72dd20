//! Timer input component for Bubble Tea applications.
//!
//! The timer input shows a fixed `00h00m00s` display. The user moves between
//! digits with the arrow keys and types a duration right to left; enter
//! starts a countdown from it, after which the view shows the remaining time
//! until the countdown finishes or is reset.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::timer_input::new;
//! use bubbletea_countdown::key::Input;
//! use bubbletea_countdown::Component;
//! use std::time::Duration;
//!
//! let mut timer = new();
//! timer.focus();
//!
//! for key in ["1", "3", "0"] {
//!     timer.feed_key(Input::from_key_name(key).unwrap());
//! }
//! assert_eq!(timer.time(), 90_000);
//!
//! timer.feed_key(Input::Confirm);
//! assert!(timer.started());
//!
//! timer.tick(Duration::from_secs(90));
//! assert!(timer.finished());
//! ```
//!
//! # Key Bindings
//!
//! Arrows navigate, digits type, backspace deletes, enter starts. Space is
//! the start/pause button and escape the reset button; see [`KeyMap`].

pub mod keymap;
pub mod model;
pub mod view;

#[cfg(test)]
mod tests;

// Re-export main types and functions for public API
pub use keymap::{default_key_map, KeyMap};
pub use model::{new, Model};
pub use view::{default_styles, Styles};
