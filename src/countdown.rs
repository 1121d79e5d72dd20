//! Countdown controller for the timer input widget.
//!
//! A [`CountdownController`] owns the committed duration and the remaining
//! time of one countdown. It moves through `Idle -> Running <-> Paused -> Idle`
//! and never owns a timer: the host delivers elapsed time through
//! [`CountdownController::tick`], or lets bubbletea deliver it through
//! [`TickMsg`] messages handled by [`CountdownController::update`].
//!
//! # Synchronous use
//!
//! ```rust
//! use bubbletea_countdown::countdown::{CountdownController, TickOutcome};
//! use bubbletea_countdown::time::TimeValue;
//! use std::time::Duration;
//!
//! let mut countdown = CountdownController::new(TimeValue::new(2_000).unwrap());
//! countdown.start().unwrap();
//!
//! assert_eq!(countdown.tick(Duration::from_secs(1)), TickOutcome::Counting);
//! assert_eq!(countdown.view(), "1s");
//! assert_eq!(countdown.tick(Duration::from_secs(5)), TickOutcome::Finished);
//! assert!(!countdown.started());
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use bubbletea_countdown::countdown::{CountdownController, TimeoutMsg};
//! use bubbletea_countdown::time::TimeValue;
//!
//! struct MyApp {
//!     countdown: CountdownController,
//!     done: bool,
//! }
//!
//! impl BubbleTeaModel for MyApp {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let countdown = CountdownController::new(TimeValue::new(10_000).unwrap());
//!         let cmd = countdown.start_cmd();
//!         (Self { countdown, done: false }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(timeout) = msg.downcast_ref::<TimeoutMsg>() {
//!             if timeout.id == self.countdown.id() {
//!                 self.done = true;
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("Time remaining: {}", self.countdown.view())
//!     }
//! }
//! ```

use crate::error::{Result, TimerError};
use crate::time::{TimeValue, ONE_SECOND};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for countdown instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Lifecycle of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// Not started, or finished, or stopped.
    Idle,
    /// Counting down on every tick.
    Running,
    /// Started but ignoring ticks.
    Paused,
}

/// What a tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was not running; nothing changed.
    Ignored,
    /// Time was consumed and some remains.
    Counting,
    /// The remaining time reached zero and the countdown went idle.
    Finished,
}

/// Message used to start, resume and pause a countdown.
#[derive(Debug, Clone)]
pub struct StartStopMsg {
    /// The countdown this message targets. `0` targets every countdown.
    pub id: i64,
    running: bool,
}

/// Message sent on every tick of a running countdown.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The countdown that scheduled this tick.
    pub id: i64,
    /// Whether the countdown had already reached zero when the tick was
    /// scheduled.
    pub timeout: bool,
    tag: i64,
}

/// Message sent when a countdown reaches zero on its own.
///
/// This is the "finished" signal: it is never sent for an explicit stop, so
/// hosts can use it to decide whether to play a completion sound.
#[derive(Debug, Clone)]
pub struct TimeoutMsg {
    /// The countdown that finished.
    pub id: i64,
}

/// Owns the remaining time of one countdown and its state transitions.
#[derive(Debug, Clone)]
pub struct CountdownController {
    /// Time consumed by each bubbletea tick, and the tick cadence.
    pub interval: Duration,

    duration: TimeValue,
    remaining: TimeValue,
    state: CountdownState,
    id: i64,
    tag: i64,
}

impl CountdownController {
    /// Creates an idle countdown for `duration` with a one second tick.
    pub fn new(duration: TimeValue) -> Self {
        Self {
            interval: Duration::from_millis(ONE_SECOND as u64),
            duration,
            remaining: duration,
            state: CountdownState::Idle,
            id: next_id(),
            tag: 0,
        }
    }

    /// Sets the bubbletea tick cadence.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Unique identifier used to route messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Whether the countdown has been started and not yet finished or stopped.
    pub fn started(&self) -> bool {
        self.state != CountdownState::Idle
    }

    /// Whether ticks are currently consumed.
    pub fn running(&self) -> bool {
        self.state == CountdownState::Running
    }

    /// Whether the countdown is started but paused.
    pub fn paused(&self) -> bool {
        self.state == CountdownState::Paused
    }

    /// The committed duration that `start` counts down from.
    pub fn duration(&self) -> TimeValue {
        self.duration
    }

    /// Time left in the current run.
    pub fn remaining(&self) -> TimeValue {
        self.remaining
    }

    /// Replaces the committed duration. While idle the remaining time follows
    /// it; a started countdown picks it up on its next start.
    pub fn set_duration(&mut self, duration: TimeValue) {
        self.duration = duration;
        if self.state == CountdownState::Idle {
            self.remaining = duration;
        }
    }

    /// Snapshots the committed duration as the remaining time and starts
    /// counting.
    pub fn start(&mut self) -> Result<()> {
        if self.state != CountdownState::Idle {
            log::warn!("cannot start countdown {}: already started", self.id);
            return Err(TimerError::AlreadyRunning);
        }
        self.remaining = self.duration;
        self.state = CountdownState::Running;
        self.tag += 1;
        log::debug!("countdown {} started at {}", self.id, self.remaining);
        Ok(())
    }

    /// Stops consuming ticks. Pausing a paused countdown does nothing.
    pub fn pause(&mut self) -> Result<()> {
        match self.state {
            CountdownState::Idle => Err(TimerError::NotRunning),
            CountdownState::Paused => Ok(()),
            CountdownState::Running => {
                self.state = CountdownState::Paused;
                log::debug!("countdown {} paused at {}", self.id, self.remaining);
                Ok(())
            }
        }
    }

    /// Resumes a paused countdown. Resuming a running countdown does nothing.
    pub fn resume(&mut self) -> Result<()> {
        match self.state {
            CountdownState::Idle => Err(TimerError::NotRunning),
            CountdownState::Running => Ok(()),
            CountdownState::Paused => {
                self.state = CountdownState::Running;
                self.tag += 1;
                log::debug!("countdown {} resumed at {}", self.id, self.remaining);
                Ok(())
            }
        }
    }

    /// Flips between running and paused.
    pub fn toggle_pause(&mut self) -> Result<()> {
        if self.paused() {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Consumes `delta` of remaining time while running, clamping at zero.
    /// Reaching zero moves the countdown to idle and reports
    /// [`TickOutcome::Finished`].
    pub fn tick(&mut self, delta: Duration) -> TickOutcome {
        if self.state != CountdownState::Running {
            return TickOutcome::Ignored;
        }
        let delta = u64::try_from(delta.as_millis()).unwrap_or(u64::MAX);
        if self.remaining.saturating_decrement(delta) {
            self.state = CountdownState::Idle;
            log::debug!("countdown {} finished", self.id);
            return TickOutcome::Finished;
        }
        TickOutcome::Counting
    }

    /// Ends the run immediately without the finished signal.
    pub fn stop(&mut self) -> Result<()> {
        if self.state == CountdownState::Idle {
            log::warn!("cannot stop countdown {}: not started", self.id);
            return Err(TimerError::NotRunning);
        }
        self.state = CountdownState::Idle;
        log::debug!("countdown {} stopped with {} left", self.id, self.remaining);
        Ok(())
    }

    /// Goes idle and restores the remaining time to the committed duration.
    pub fn reset(&mut self) {
        self.state = CountdownState::Idle;
        self.remaining = self.duration;
    }

    /// Command that starts or resumes this countdown.
    pub fn start_cmd(&self) -> Cmd {
        self.start_stop(true)
    }

    /// Command that pauses this countdown.
    pub fn pause_cmd(&self) -> Cmd {
        self.start_stop(false)
    }

    /// Command that toggles between running and paused.
    pub fn toggle_cmd(&self) -> Cmd {
        self.start_stop(!self.running())
    }

    fn start_stop(&self, running: bool) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(StartStopMsg { id, running }) as Msg
        })
    }

    fn tick_cmd(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        let timeout = self.remaining.is_zero();
        bubbletea_tick(self.interval, move |_| {
            Box::new(TickMsg { id, timeout, tag }) as Msg
        })
    }

    fn timeout_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(TimeoutMsg { id }) as Msg
        })
    }

    /// Returns the tick command when the countdown is already running.
    pub fn init(&self) -> Option<Cmd> {
        if self.running() {
            return Some(self.tick_cmd());
        }
        None
    }

    /// Handles [`StartStopMsg`] and [`TickMsg`] addressed to this countdown.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(start_stop) = msg.downcast_ref::<StartStopMsg>() {
            if start_stop.id != 0 && start_stop.id != self.id {
                return None;
            }
            if !start_stop.running {
                let _ = self.pause();
                return None;
            }
            let started = match self.state {
                CountdownState::Idle => self.start(),
                CountdownState::Paused => self.resume(),
                // already ticking
                CountdownState::Running => return None,
            };
            return started.ok().map(|_| self.tick_cmd());
        }

        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if !self.running() || (tick_msg.id != 0 && tick_msg.id != self.id) {
                return None;
            }

            // A tag from before a pause or restart belongs to a dead tick
            // chain; accepting it would tick twice per interval.
            if tick_msg.tag > 0 && tick_msg.tag != self.tag {
                return None;
            }

            let outcome = self.tick(self.interval);
            self.tag += 1;
            return match outcome {
                TickOutcome::Finished => Some(self.timeout_cmd()),
                TickOutcome::Counting => Some(self.tick_cmd()),
                TickOutcome::Ignored => None,
            };
        }

        None
    }

    /// Remaining time as a compact string, e.g. `"1m30s"`.
    pub fn view(&self) -> String {
        self.remaining.time_string()
    }
}

impl Default for CountdownController {
    fn default() -> Self {
        Self::new(TimeValue::new(60 * ONE_SECOND).unwrap_or_default())
    }
}

impl BubbleTeaModel for CountdownController {
    fn init() -> (Self, Option<Cmd>) {
        let model = Self::default();
        let cmd = model.start_cmd();
        (model, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
