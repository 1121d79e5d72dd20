//! Bounded millisecond durations with unit decomposition and formatting.
//!
//! A [`TimeValue`] holds a duration in milliseconds that is always inside
//! `[0, MAX_MILLISECONDS)`. Every mutation re-runs the range check, so a
//! countdown that decrements past zero fails loudly instead of wrapping.
//!
//! ```rust
//! use bubbletea_countdown::time::{TimeValue, Unit};
//!
//! let mut t = TimeValue::new(3_600_000).unwrap();
//! assert_eq!(t.time_string(), "1h0m0s");
//!
//! t.decrement(1).unwrap();
//! assert_eq!(t.time_string(), "59m59s");
//!
//! assert_eq!(TimeValue::convert_to_milliseconds(2, Unit::Minute), 120_000);
//! assert!(TimeValue::new(-1).is_err());
//! ```

use crate::error::{Result, TimerError};
use std::fmt;
use std::time::Duration;

/// Exclusive upper bound of a [`TimeValue`]: one week.
pub const MAX_MILLISECONDS: i64 = 604_800_000;

/// Milliseconds in one second.
pub const ONE_SECOND: i64 = 1_000;
/// Milliseconds in one minute.
pub const ONE_MINUTE: i64 = 60 * ONE_SECOND;
/// Milliseconds in one hour.
pub const ONE_HOUR: i64 = 60 * ONE_MINUTE;
/// Milliseconds in one day.
pub const ONE_DAY: i64 = 24 * ONE_HOUR;

// hour <-> minute, minute <-> second, second <-> millisecond
const OPERANDS: [i64; 3] = [60, 60, 1_000];

/// The units a user can enter a duration in, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    /// Hours.
    Hour,
    /// Minutes.
    Minute,
    /// Seconds.
    Second,
}

impl Unit {
    /// All units in display order.
    pub const ALL: [Unit; 3] = [Unit::Hour, Unit::Minute, Unit::Second];

    /// Position of the unit in the conversion chain and on the display.
    pub fn index(self) -> usize {
        match self {
            Unit::Hour => 0,
            Unit::Minute => 1,
            Unit::Second => 2,
        }
    }

    /// The glyph shown after the unit's digits.
    pub fn glyph(self) -> char {
        match self {
            Unit::Hour => 'h',
            Unit::Minute => 'm',
            Unit::Second => 's',
        }
    }

    /// Milliseconds in one of this unit, composed from the conversion chain.
    pub fn milliseconds(self) -> i64 {
        OPERANDS[self.index()..].iter().product()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A duration in milliseconds, always inside `[0, MAX_MILLISECONDS)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeValue {
    milliseconds: i64,
}

impl TimeValue {
    /// The zero duration.
    pub const ZERO: TimeValue = TimeValue { milliseconds: 0 };

    /// Creates a value, failing with [`TimerError::OutOfRange`] outside
    /// `[0, MAX_MILLISECONDS)`.
    pub fn new(milliseconds: i64) -> Result<Self> {
        check(milliseconds)?;
        Ok(Self { milliseconds })
    }

    /// Total milliseconds.
    pub fn milliseconds(&self) -> i64 {
        self.milliseconds
    }

    /// Assigns a new millisecond count. The range check runs on every call;
    /// on failure the value is left unchanged.
    pub fn set_milliseconds(&mut self, milliseconds: i64) -> Result<()> {
        check(milliseconds)?;
        self.milliseconds = milliseconds;
        Ok(())
    }

    /// Subtracts `delta`, failing instead of going below zero.
    pub fn decrement(&mut self, delta: i64) -> Result<()> {
        let next = self
            .milliseconds
            .checked_sub(delta)
            .ok_or_else(|| TimerError::out_of_range("milliseconds", i64::MIN, 0, MAX_MILLISECONDS))?;
        self.set_milliseconds(next)
    }

    /// Subtracts `delta`, clamping at zero. Returns `true` when the value is
    /// zero afterwards.
    ///
    /// Tick drivers use this since they cannot know the exact remaining time
    /// between ticks.
    pub fn saturating_decrement(&mut self, delta: u64) -> bool {
        let delta = i64::try_from(delta).unwrap_or(i64::MAX);
        self.milliseconds = self.milliseconds.saturating_sub(delta).max(0);
        self.is_zero()
    }

    /// Whether no time is left.
    pub fn is_zero(&self) -> bool {
        self.milliseconds == 0
    }

    /// Whole days.
    pub fn days(&self) -> i64 {
        self.milliseconds / ONE_DAY
    }

    /// Hours within the day, `0..24`.
    pub fn hours(&self) -> i64 {
        (self.milliseconds / ONE_HOUR) % 24
    }

    /// Minutes within the hour, `0..60`.
    pub fn minutes(&self) -> i64 {
        (self.milliseconds / ONE_MINUTE) % 60
    }

    /// Seconds within the minute, `0..60`.
    pub fn seconds(&self) -> i64 {
        (self.milliseconds / ONE_SECOND) % 60
    }

    /// Compact representation that drops leading zero units but always ends
    /// with seconds, e.g. `"0s"`, `"40s"`, `"1m0s"`, `"1h0m0s"`.
    ///
    /// Durations of a day or more are prefixed with whole days, with hours
    /// and minutes always shown after them.
    pub fn time_string(&self) -> String {
        let days = self.days();
        let hours = self.hours();
        let minutes = self.minutes();

        let mut out = String::new();
        if days > 0 {
            out.push_str(&format!("{}d{}h{}m", days, hours, minutes));
        } else if hours > 0 {
            out.push_str(&format!("{}h{}m", hours, minutes));
        } else if minutes > 0 {
            out.push_str(&format!("{}m", minutes));
        }
        out.push_str(&format!("{}s", self.seconds()));
        out
    }

    /// The value as a [`Duration`].
    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.milliseconds as u64)
    }

    /// Converts a magnitude in `unit` to milliseconds by multiplying through
    /// every factor between `unit` and milliseconds.
    pub fn convert_to_milliseconds(value: i64, unit: Unit) -> i64 {
        OPERANDS[unit.index()..]
            .iter()
            .fold(value, |acc, factor| acc.saturating_mul(*factor))
    }

    /// Converts milliseconds to a whole magnitude in `unit`, truncating
    /// toward zero at each step.
    pub fn convert_from_milliseconds(value: i64, unit: Unit) -> i64 {
        OPERANDS[unit.index()..]
            .iter()
            .rev()
            .fold(value, |acc, factor| acc / factor)
    }
}

fn check(milliseconds: i64) -> Result<()> {
    if !(0..MAX_MILLISECONDS).contains(&milliseconds) {
        return Err(TimerError::out_of_range(
            "milliseconds",
            milliseconds,
            0,
            MAX_MILLISECONDS,
        ));
    }
    Ok(())
}

impl TryFrom<Duration> for TimeValue {
    type Error = TimerError;

    fn try_from(d: Duration) -> Result<Self> {
        let millis = i64::try_from(d.as_millis()).unwrap_or(i64::MAX);
        TimeValue::new(millis)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.time_string())
    }
}
