//! Core model for the timer input component.

use super::keymap::{default_key_map, KeyMap};
use super::view::{default_styles, Styles};
use crate::countdown::{CountdownController, TickOutcome, TimeoutMsg};
use crate::cursor::{self, DigitCursor, DisplayModel};
use crate::error::{Result, TimerError};
use crate::key::Input;
use crate::time::TimeValue;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use std::time::Duration;

/// Model is the timer input: a digit entry display paired with the countdown
/// it starts.
#[derive(Debug, Clone)]
pub struct Model {
    /// Key bindings.
    pub key_map: KeyMap,
    /// Styles used by `view`.
    pub styles: Styles,

    pub(super) cursor: DigitCursor,
    pub(super) countdown: CountdownController,
    pub(super) focus: bool,
    pub(super) finished: bool,
}

/// Creates an unfocused timer input with an all-zero display.
pub fn new() -> Model {
    Model {
        key_map: default_key_map(),
        styles: default_styles(),
        cursor: DigitCursor::new(),
        countdown: CountdownController::new(TimeValue::ZERO),
        focus: false,
        finished: false,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Same as [`new`].
    pub fn new() -> Self {
        new()
    }

    /// Sets the countdown tick cadence used under bubbletea.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.countdown.interval = interval;
        self
    }

    /// The digit entry state.
    pub fn cursor(&self) -> &DigitCursor {
        &self.cursor
    }

    /// The countdown state.
    pub fn countdown(&self) -> &CountdownController {
        &self.countdown
    }

    /// Index of the selected display slot.
    pub fn current_index(&self) -> usize {
        self.cursor.selected_index()
    }

    /// The duration currently entered on the display, in milliseconds. This
    /// is the input, not the running countdown.
    pub fn time(&self) -> i64 {
        self.cursor.committed_milliseconds()
    }

    /// The entered duration as a [`TimeValue`].
    pub fn time_value(&self) -> Result<TimeValue> {
        self.cursor.commit().to_time_value()
    }

    /// Whether a countdown has been started and not finished or stopped.
    pub fn started(&self) -> bool {
        self.countdown.started()
    }

    /// Whether the countdown is consuming ticks.
    pub fn running(&self) -> bool {
        self.countdown.running()
    }

    /// Whether the countdown is started but paused.
    pub fn paused(&self) -> bool {
        self.countdown.paused()
    }

    /// Whether the last run reached zero on its own. Cleared on the next
    /// start; never set by an explicit stop.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Projection of the digit display for custom rendering.
    pub fn display_model(&self) -> DisplayModel {
        cursor::render(&self.cursor)
    }

    /// Routes one abstract input to the cursor or countdown. Inputs are
    /// ignored while unfocused, and editing inputs are ignored while a
    /// countdown is started.
    pub fn feed_key(&mut self, input: Input) {
        if !self.focus {
            log::trace!("timer input unfocused, ignoring {:?}", input);
            return;
        }
        if self.started() {
            log::trace!("countdown started, ignoring {:?}", input);
            return;
        }
        match input {
            Input::Next => self.cursor.select_next(),
            Input::Previous => self.cursor.select_previous(),
            Input::Backspace => self.cursor.backspace(),
            Input::Confirm => {
                let _ = self.start();
            }
            Input::Digit(d) => {
                if let Err(err) = self.cursor.insert_digit(d) {
                    log::warn!("ignoring digit: {}", err);
                }
            }
        }
    }

    /// Commits the entered duration and starts counting it down.
    pub fn start(&mut self) -> Result<()> {
        if self.started() {
            log::warn!("cannot start timer input: already started");
            return Err(TimerError::AlreadyRunning);
        }
        let duration = self.time_value()?;
        self.countdown.set_duration(duration);
        self.countdown.start()?;
        self.finished = false;
        Ok(())
    }

    /// Pauses a running countdown or resumes a paused one.
    pub fn pause(&mut self) -> Result<()> {
        self.countdown.toggle_pause()
    }

    /// Stops the countdown without the finished signal.
    pub fn stop(&mut self) -> Result<()> {
        self.countdown.stop()
    }

    /// Stops a started countdown and returns to the entry display, which
    /// still holds the last entered duration.
    pub fn reset(&mut self) -> Result<()> {
        self.countdown.stop()?;
        self.countdown.reset();
        Ok(())
    }

    /// Resets every entered digit to zero.
    pub fn clear_input(&mut self) {
        self.cursor.clear();
    }

    /// The start button: starts when idle, otherwise pauses or unpauses.
    pub fn press_start(&mut self) {
        if !self.focus {
            return;
        }
        let result = if self.started() {
            self.pause()
        } else {
            self.start()
        };
        if let Err(err) = result {
            log::warn!("start button: {}", err);
        }
    }

    /// The reset button: stops a started countdown, otherwise clears the
    /// entered digits.
    pub fn press_reset(&mut self) {
        if !self.focus {
            return;
        }
        if self.started() {
            let _ = self.reset();
        } else {
            self.clear_input();
        }
    }

    /// Feeds elapsed time to the countdown. A natural finish sets
    /// [`finished`](Model::finished).
    pub fn tick(&mut self, delta: Duration) -> TickOutcome {
        let outcome = self.countdown.tick(delta);
        if outcome == TickOutcome::Finished {
            self.finished = true;
        }
        outcome
    }

    /// Handles key messages while focused and forwards countdown messages.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if !self.focus {
                return None;
            }
            let was_running = self.running();

            if self.key_map.start_pause.matches(key_msg) {
                self.press_start();
            } else if self.key_map.reset.matches(key_msg) {
                self.press_reset();
            } else if let Some(input) = self.key_map.resolve(key_msg) {
                self.feed_key(input);
            }

            if !was_running && self.running() {
                return self.countdown.init();
            }
            return None;
        }

        if let Some(timeout) = msg.downcast_ref::<TimeoutMsg>() {
            if timeout.id == self.countdown.id() {
                self.finished = true;
            }
            return None;
        }

        self.countdown.update(msg)
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        self.cursor.activate();
        None
    }

    fn blur(&mut self) {
        self.focus = false;
        self.cursor.deactivate();
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = new();
        let cmd = model.focus();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
