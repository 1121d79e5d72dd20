//! Error types shared by the countdown components.

/// Errors raised by the time, cursor, countdown and interval components.
///
/// Range violations are contract violations: callers rely on them to reject
/// invalid committed durations, so values are never silently clamped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// A value or index fell outside `[min, max)`.
    #[error("{what} out of range: {value} not in [{min}, {max})")]
    OutOfRange {
        /// What was being checked (e.g. "milliseconds", "slot index").
        what: &'static str,
        /// The rejected value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Exclusive upper bound.
        max: i64,
    },
    /// `start` was called on a countdown that is not idle.
    #[error("countdown is already running")]
    AlreadyRunning,
    /// A transition that needs a started countdown was called while idle.
    #[error("countdown is not running")]
    NotRunning,
    /// The only remaining interval cannot be removed.
    #[error("cannot remove the last interval of a sequence")]
    LastInterval,
}

impl TimerError {
    pub(crate) fn out_of_range(what: &'static str, value: i64, min: i64, max: i64) -> Self {
        TimerError::OutOfRange {
            what,
            value,
            min,
            max,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TimerError>;
