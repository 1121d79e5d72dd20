#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-countdown/")]

//! # bubbletea-countdown
//!
//! A countdown timer input for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: a fixed `00h00m00s` display edited digit by digit, a
//! countdown that can be started, paused, stopped and reset, and an interval
//! sequencer that chains countdowns and loops over them.
//!
//! ## Overview
//!
//! The crate is layered so each piece can be used on its own:
//!
//! - [`time`]: [`TimeValue`], a range-checked millisecond duration with
//!   unit conversions and the compact `1h0m5s` format.
//! - [`cursor`]: [`DigitCursor`], the nine-slot digit entry model.
//! - [`countdown`]: [`CountdownController`], the running/paused/idle state
//!   machine, driven by explicit ticks or by bubbletea tick commands.
//! - [`interval`]: [`IntervalSequencer`], an ordered list of intervals with
//!   advance and finish callbacks and a loop budget.
//! - [`timer_input`]: [`TimerInput`], the bubbletea component tying the
//!   cursor and the countdown to key messages.
//!
//! ## Focus Management
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//! use bubbletea_rs::Cmd;
//!
//! fn handle_focus<T: Component>(component: &mut T) {
//!     let _cmd: Option<Cmd> = component.focus();
//!     assert!(component.focused());
//!     component.blur();
//!     assert!(!component.focused());
//! }
//!
//! let mut timer = timer_input_new();
//! handle_focus(&mut timer);
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     timer: TimerInput,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut timer = timer_input_new();
//!         let cmd = timer.focus();
//!         (Self { timer }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(timeout) = msg.downcast_ref::<CountdownTimeoutMsg>() {
//!             let _ = timeout.id;
//!         }
//!         self.timer.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("{}\n\nspace start/pause, esc reset", self.timer.view())
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! Rejected transitions and invalid input are reported through the [`log`]
//! facade at `warn`, state changes at `debug` and ignored keys at `trace`.
//! No logger is installed by the crate.

pub mod countdown;
pub mod cursor;
pub mod error;
pub mod interval;
pub mod key;
pub mod time;
pub mod timer_input;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A focused component receives keyboard input and shows its selection; a
/// blurred one ignores keys and renders without highlight.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// let mut timer = timer_input_new();
/// assert!(!timer.focused());
///
/// timer.focus();
/// assert!(timer.focused());
///
/// timer.blur();
/// assert!(!timer.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state. May return a command to run on
    /// focus.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use countdown::{
    CountdownController, CountdownState, StartStopMsg as CountdownStartStopMsg,
    TickMsg as CountdownTickMsg, TickOutcome, TimeoutMsg as CountdownTimeoutMsg,
};
pub use cursor::{DigitCursor, DisplayCell, DisplayModel, Slot};
pub use error::{Result, TimerError};
pub use interval::{IntervalSequencer, SequenceEvent};
pub use key::{Binding, Input};
pub use time::{TimeValue, Unit};
pub use timer_input::{
    default_key_map as timer_input_default_key_map, default_styles as timer_input_default_styles,
    new as timer_input_new, KeyMap as TimerInputKeyMap, Model as TimerInput,
    Styles as TimerInputStyles,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// let mut sequence = IntervalSequencer::new(1_000).unwrap();
/// sequence.add_interval(2_000).unwrap();
/// assert_eq!(sequence.intervals().len(), 2);
/// ```
pub mod prelude {
    pub use crate::Component;

    pub use crate::{
        timer_input_default_key_map, timer_input_default_styles, timer_input_new, Binding,
        CountdownController, CountdownState, CountdownStartStopMsg, CountdownTickMsg,
        CountdownTimeoutMsg, DigitCursor, DisplayModel, Input, IntervalSequencer, SequenceEvent,
        TickOutcome, TimeValue, TimerError, TimerInput, TimerInputKeyMap, TimerInputStyles, Unit,
    };
}
