//! Interval sequencing for chained and repeating countdowns.
//!
//! An [`IntervalSequencer`] walks an ordered list of durations. Each
//! [`do_tick`](IntervalSequencer::do_tick) consumes elapsed time from the
//! current interval; when it reaches zero the sequencer advances to the next
//! interval, restarts the whole sequence while loop budget remains, or
//! finishes and rewinds to the first interval.
//!
//! Hosts learn about transitions either from the returned [`SequenceEvent`]
//! or from the `on_next` / `on_finish` callbacks. Callbacks receive the
//! sequencer itself and run only after the transition is fully committed, so
//! they may reconfigure it (add intervals, change looping, and so on).
//!
//! ```rust
//! use bubbletea_countdown::interval::{IntervalSequencer, SequenceEvent};
//!
//! let mut seq = IntervalSequencer::new(1_000).unwrap();
//! seq.add_interval(2_000).unwrap();
//!
//! assert_eq!(seq.do_tick(1_000), Some(SequenceEvent::Advanced { index: 1 }));
//! assert_eq!(seq.do_tick(1_500), None);
//! assert_eq!(seq.do_tick(500), Some(SequenceEvent::Finished));
//! assert_eq!(seq.current_index(), 0);
//! ```

use crate::error::{Result, TimerError};
use crate::time::TimeValue;
use std::cmp::Ordering;
use std::fmt;

/// Callback fired on an in-bounds advance or on terminal completion.
pub type Callback = Box<dyn FnMut(&mut IntervalSequencer) + Send>;

/// A transition reported by [`IntervalSequencer::do_tick`] and
/// [`IntervalSequencer::next`]. Loop restarts are silent and report nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEvent {
    /// Moved to the interval at `index`.
    Advanced {
        /// Index of the interval now running.
        index: usize,
    },
    /// The sequence (and its loop budget) is exhausted.
    Finished,
}

/// Runs an ordered list of intervals, optionally repeating it.
pub struct IntervalSequencer {
    intervals: Vec<TimeValue>,
    current_index: usize,
    time: TimeValue,
    loop_enabled: bool,
    max_loop_count: u32,
    current_loop_count: u32,
    on_finish: Option<Callback>,
    on_next: Option<Callback>,
}

impl IntervalSequencer {
    /// Creates a sequencer with a single interval of `starting_milliseconds`.
    pub fn new(starting_milliseconds: i64) -> Result<Self> {
        let first = TimeValue::new(starting_milliseconds)?;
        Ok(Self {
            intervals: vec![first],
            current_index: 0,
            time: first,
            loop_enabled: false,
            max_loop_count: 1,
            current_loop_count: 0,
            on_finish: None,
            on_next: None,
        })
    }

    /// Sets the completion callback.
    pub fn with_on_finish<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut IntervalSequencer) + Send + 'static,
    {
        self.set_on_finish(callback);
        self
    }

    /// Sets the advance callback.
    pub fn with_on_next<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut IntervalSequencer) + Send + 'static,
    {
        self.set_on_next(callback);
        self
    }

    /// Enables looping with a budget of `max_loop_count` restarts.
    pub fn with_loop(mut self, max_loop_count: u32) -> Result<Self> {
        self.set_loop(true, max_loop_count)?;
        Ok(self)
    }

    /// Replaces the completion callback.
    pub fn set_on_finish<F>(&mut self, callback: F)
    where
        F: FnMut(&mut IntervalSequencer) + Send + 'static,
    {
        self.on_finish = Some(Box::new(callback));
    }

    /// Replaces the advance callback.
    pub fn set_on_next<F>(&mut self, callback: F)
    where
        F: FnMut(&mut IntervalSequencer) + Send + 'static,
    {
        self.on_next = Some(Box::new(callback));
    }

    /// Configures looping. `max_loop_count` must be at least one.
    pub fn set_loop(&mut self, enabled: bool, max_loop_count: u32) -> Result<()> {
        if max_loop_count == 0 {
            return Err(TimerError::out_of_range(
                "loop count",
                0,
                1,
                i64::from(u32::MAX),
            ));
        }
        self.loop_enabled = enabled;
        self.max_loop_count = max_loop_count;
        Ok(())
    }

    /// Whether the sequence restarts after the last interval.
    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    /// Maximum number of full restarts before finishing.
    pub fn max_loop_count(&self) -> u32 {
        self.max_loop_count
    }

    /// Restarts consumed in the current run.
    pub fn current_loop_count(&self) -> u32 {
        self.current_loop_count
    }

    /// The intervals, in order.
    pub fn intervals(&self) -> &[TimeValue] {
        &self.intervals
    }

    /// Index of the running interval.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Remaining time of the running interval.
    pub fn time(&self) -> TimeValue {
        self.time
    }

    /// Remaining milliseconds of the running interval.
    pub fn current_time(&self) -> i64 {
        self.time.milliseconds()
    }

    /// Full length of the running interval.
    pub fn current_interval_value(&self) -> TimeValue {
        self.intervals[self.current_index]
    }

    /// Replaces the running interval's length and rewinds the sequence.
    pub fn set_current_interval_value(&mut self, milliseconds: i64) -> Result<()> {
        self.intervals[self.current_index] = TimeValue::new(milliseconds)?;
        self.reset();
        Ok(())
    }

    /// Appends an interval.
    pub fn add_interval(&mut self, milliseconds: i64) -> Result<()> {
        self.intervals.push(TimeValue::new(milliseconds)?);
        Ok(())
    }

    /// Removes the interval at `index` and returns it.
    ///
    /// Removing an interval before the running one keeps the same interval
    /// running. Removing the running interval starts the one that slides into
    /// its place, or the first interval if it was the last. The only
    /// remaining interval cannot be removed.
    pub fn remove_interval(&mut self, index: usize) -> Result<TimeValue> {
        if index >= self.intervals.len() {
            return Err(TimerError::out_of_range(
                "interval index",
                index as i64,
                0,
                self.intervals.len() as i64,
            ));
        }
        if self.intervals.len() == 1 {
            return Err(TimerError::LastInterval);
        }

        let removed = self.intervals.remove(index);
        match index.cmp(&self.current_index) {
            Ordering::Less => self.current_index -= 1,
            Ordering::Greater => {}
            Ordering::Equal => {
                if self.current_index >= self.intervals.len() {
                    self.current_index = 0;
                }
                self.time = self.intervals[self.current_index];
            }
        }
        Ok(removed)
    }

    /// Consumes `delta_milliseconds` from the running interval, clamping at
    /// zero, and advances once it is exhausted. A zero-length interval
    /// advances on the first tick whatever the delta.
    pub fn do_tick(&mut self, delta_milliseconds: u64) -> Option<SequenceEvent> {
        if self.time.saturating_decrement(delta_milliseconds) {
            return self.next();
        }
        None
    }

    /// Moves to the next interval, restarting or finishing at the end of the
    /// sequence.
    pub fn next(&mut self) -> Option<SequenceEvent> {
        self.current_index += 1;

        if self.current_index >= self.intervals.len() {
            if self.loop_enabled && self.current_loop_count < self.max_loop_count {
                let loops = self.current_loop_count + 1;
                self.rewind();
                self.current_loop_count = loops;
                log::debug!("interval sequence restarting, loop {}", loops);
                return None;
            }

            self.reset();
            log::debug!("interval sequence finished");
            self.fire_finish();
            return Some(SequenceEvent::Finished);
        }

        let index = self.current_index;
        self.time = self.intervals[index];
        log::debug!("advanced to interval {} ({})", index, self.time);
        self.fire_next();
        Some(SequenceEvent::Advanced { index })
    }

    /// Rewinds to the first interval and clears the loop count.
    pub fn reset(&mut self) {
        self.rewind();
        self.current_loop_count = 0;
    }

    fn rewind(&mut self) {
        self.current_index = 0;
        self.time = self.intervals[0];
    }

    // Callbacks are taken out while they run so they can borrow the
    // sequencer mutably; one installed during the call wins.
    fn fire_finish(&mut self) {
        if let Some(mut callback) = self.on_finish.take() {
            callback(self);
            if self.on_finish.is_none() {
                self.on_finish = Some(callback);
            }
        }
    }

    fn fire_next(&mut self) {
        if let Some(mut callback) = self.on_next.take() {
            callback(self);
            if self.on_next.is_none() {
                self.on_next = Some(callback);
            }
        }
    }
}

impl Default for IntervalSequencer {
    fn default() -> Self {
        Self {
            intervals: vec![TimeValue::ZERO],
            current_index: 0,
            time: TimeValue::ZERO,
            loop_enabled: false,
            max_loop_count: 1,
            current_loop_count: 0,
            on_finish: None,
            on_next: None,
        }
    }
}

impl fmt::Debug for IntervalSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalSequencer")
            .field("intervals", &self.intervals)
            .field("current_index", &self.current_index)
            .field("time", &self.time)
            .field("loop_enabled", &self.loop_enabled)
            .field("max_loop_count", &self.max_loop_count)
            .field("current_loop_count", &self.current_loop_count)
            .field("on_finish", &self.on_finish.is_some())
            .field("on_next", &self.on_next.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Arc;

    fn millis(seq: &IntervalSequencer) -> Vec<i64> {
        seq.intervals().iter().map(TimeValue::milliseconds).collect()
    }

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    fn counting(count: &Arc<AtomicUsize>) -> impl FnMut(&mut IntervalSequencer) + Send + 'static {
        let count = Arc::clone(count);
        move |_: &mut IntervalSequencer| {
            count.fetch_add(1, AtomicOrdering::SeqCst);
        }
    }

    fn finished(count: &Arc<AtomicUsize>) -> usize {
        count.load(AtomicOrdering::SeqCst)
    }

    #[test]
    fn test_default_has_single_zero_interval() {
        let seq = IntervalSequencer::default();
        assert_eq!(seq.current_time(), 0);
        assert_eq!(millis(&seq), vec![0]);
        assert!(!seq.loop_enabled());
        assert_eq!(seq.max_loop_count(), 1);
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            IntervalSequencer::new(-1),
            Err(TimerError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_add_intervals() {
        let mut seq = IntervalSequencer::new(0).unwrap();
        seq.add_interval(1).unwrap();
        seq.add_interval(2).unwrap();
        seq.add_interval(3).unwrap();
        assert_eq!(millis(&seq), vec![0, 1, 2, 3]);
        assert!(seq.add_interval(-5).is_err());
        assert_eq!(millis(&seq), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_remove_interval() {
        let mut seq = IntervalSequencer::new(0).unwrap();
        seq.add_interval(1).unwrap();
        assert_eq!(seq.remove_interval(0).unwrap().milliseconds(), 0);
        assert_eq!(millis(&seq), vec![1]);
        assert_eq!(seq.current_time(), 1);
    }

    #[test]
    fn test_remove_out_of_range_leaves_state() {
        let mut seq = IntervalSequencer::new(1_000).unwrap();
        seq.add_interval(2_000).unwrap();
        assert!(matches!(
            seq.remove_interval(2),
            Err(TimerError::OutOfRange { value: 2, .. })
        ));
        assert_eq!(millis(&seq), vec![1_000, 2_000]);
    }

    #[test]
    fn test_remove_last_remaining_interval_fails() {
        let mut seq = IntervalSequencer::new(1_000).unwrap();
        assert_eq!(seq.remove_interval(0), Err(TimerError::LastInterval));
        assert_eq!(millis(&seq), vec![1_000]);
    }

    #[test]
    fn test_remove_before_current_keeps_running_interval() {
        let mut seq = IntervalSequencer::new(1_000).unwrap();
        seq.add_interval(2_000).unwrap();
        seq.add_interval(3_000).unwrap();
        seq.do_tick(1_000);
        seq.do_tick(500);
        assert_eq!(seq.current_index(), 1);

        seq.remove_interval(0).unwrap();
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.current_interval_value().milliseconds(), 2_000);
        assert_eq!(seq.current_time(), 1_500);
    }

    #[test]
    fn test_remove_current_starts_successor() {
        let mut seq = IntervalSequencer::new(1_000).unwrap();
        seq.add_interval(2_000).unwrap();
        seq.add_interval(3_000).unwrap();
        seq.do_tick(1_000);
        seq.do_tick(500);

        seq.remove_interval(1).unwrap();
        assert_eq!(seq.current_index(), 1);
        assert_eq!(seq.current_time(), 3_000);
    }

    #[test]
    fn test_remove_current_last_wraps_to_first() {
        let mut seq = IntervalSequencer::new(1_000).unwrap();
        seq.add_interval(2_000).unwrap();
        seq.do_tick(1_000);
        assert_eq!(seq.current_index(), 1);

        seq.remove_interval(1).unwrap();
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.current_time(), 1_000);
    }

    #[test]
    fn test_running_one_interval() {
        let done = counter();
        let mut seq = IntervalSequencer::new(1_000)
            .unwrap()
            .with_on_finish(counting(&done));
        assert_eq!(seq.do_tick(1_000), Some(SequenceEvent::Finished));
        assert_eq!(finished(&done), 1);
    }

    #[test]
    fn test_running_two_intervals() {
        let done = counter();
        let mut seq = IntervalSequencer::new(1_000)
            .unwrap()
            .with_on_finish(counting(&done));
        seq.add_interval(2_000).unwrap();
        seq.do_tick(1_000);
        assert_eq!(finished(&done), 0);
        seq.do_tick(2_000);
        assert_eq!(finished(&done), 1);
    }

    #[test]
    fn test_running_three_intervals() {
        let done = counter();
        let mut seq = IntervalSequencer::new(1_000)
            .unwrap()
            .with_on_finish(counting(&done));
        seq.add_interval(2_000).unwrap();
        seq.add_interval(3_000).unwrap();
        seq.do_tick(1_000);
        seq.do_tick(2_000);
        assert_eq!(finished(&done), 0);
        seq.do_tick(3_000);
        assert_eq!(finished(&done), 1);
    }

    #[test]
    fn test_single_interval_loop() {
        let done = counter();
        let mut seq = IntervalSequencer::new(1_000)
            .unwrap()
            .with_on_finish(counting(&done))
            .with_loop(1)
            .unwrap();
        assert_eq!(seq.do_tick(1_000), None);
        assert_eq!(finished(&done), 0);
        assert_eq!(seq.current_loop_count(), 1);
        assert_eq!(seq.do_tick(1_000), Some(SequenceEvent::Finished));
        assert_eq!(finished(&done), 1);
        assert_eq!(seq.current_loop_count(), 0);
    }

    #[test]
    fn test_single_interval_multiple_loops() {
        let done = counter();
        let mut seq = IntervalSequencer::new(1_000)
            .unwrap()
            .with_on_finish(counting(&done))
            .with_loop(2)
            .unwrap();
        seq.do_tick(1_000);
        seq.do_tick(1_000);
        assert_eq!(finished(&done), 0);
        seq.do_tick(1_000);
        assert_eq!(finished(&done), 1);
    }

    #[test]
    fn test_two_interval_loop() {
        let done = counter();
        let mut seq = IntervalSequencer::new(1_000)
            .unwrap()
            .with_on_finish(counting(&done))
            .with_loop(1)
            .unwrap();
        seq.add_interval(2_000).unwrap();
        seq.do_tick(1_000);
        seq.do_tick(2_000);
        seq.do_tick(1_000);
        assert_eq!(finished(&done), 0);
        seq.do_tick(2_000);
        assert_eq!(finished(&done), 1);
    }

    #[test]
    fn test_loop_disabled_ignores_budget() {
        let done = counter();
        let mut seq = IntervalSequencer::new(1_000)
            .unwrap()
            .with_on_finish(counting(&done));
        seq.set_loop(false, 5).unwrap();
        seq.do_tick(1_000);
        assert_eq!(finished(&done), 1);
    }

    #[test]
    fn test_set_loop_rejects_zero_budget() {
        let mut seq = IntervalSequencer::new(1_000).unwrap();
        assert!(seq.set_loop(true, 0).is_err());
        assert!(!seq.loop_enabled());
    }

    #[test]
    fn test_on_next_only_on_in_bounds_advance() {
        let advanced = counter();
        let done = counter();
        let mut seq = IntervalSequencer::new(1_000)
            .unwrap()
            .with_on_next(counting(&advanced))
            .with_on_finish(counting(&done))
            .with_loop(1)
            .unwrap();
        seq.add_interval(2_000).unwrap();

        seq.do_tick(1_000); // advance
        seq.do_tick(2_000); // loop restart
        seq.do_tick(1_000); // advance
        seq.do_tick(2_000); // finish
        assert_eq!(finished(&advanced), 2);
        assert_eq!(finished(&done), 1);
    }

    #[test]
    fn test_tick_clamps_and_partial_ticks_accumulate() {
        let mut seq = IntervalSequencer::new(1_000).unwrap();
        seq.add_interval(2_000).unwrap();
        assert_eq!(seq.do_tick(400), None);
        assert_eq!(seq.current_time(), 600);
        assert_eq!(seq.do_tick(10_000), Some(SequenceEvent::Advanced { index: 1 }));
        assert_eq!(seq.current_time(), 2_000);
    }

    #[test]
    fn test_zero_interval_completes_on_next_tick() {
        let mut seq = IntervalSequencer::new(0).unwrap();
        seq.add_interval(500).unwrap();
        assert_eq!(seq.do_tick(0), Some(SequenceEvent::Advanced { index: 1 }));
    }

    #[test]
    fn test_set_current_interval_value_rewinds() {
        let mut seq = IntervalSequencer::new(1_000).unwrap();
        seq.add_interval(2_000).unwrap();
        seq.do_tick(1_000);
        seq.set_current_interval_value(5_000).unwrap();
        assert_eq!(millis(&seq), vec![1_000, 5_000]);
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.current_time(), 1_000);
    }

    #[test]
    fn test_finish_callback_may_reconfigure() {
        let mut seq = IntervalSequencer::new(1_000)
            .unwrap()
            .with_on_finish(|seq: &mut IntervalSequencer| {
                if seq.intervals().len() == 1 {
                    seq.add_interval(3_000).unwrap();
                    seq.set_loop(true, 1).unwrap();
                }
            });

        assert_eq!(seq.do_tick(1_000), Some(SequenceEvent::Finished));
        // state was committed before the callback ran
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.current_time(), 1_000);
        assert_eq!(millis(&seq), vec![1_000, 3_000]);
        assert!(seq.loop_enabled());
    }

    #[test]
    fn test_callback_replaced_during_call_wins() {
        let replaced = counter();
        let replacement = counting(&replaced);
        let mut replacement = Some(replacement);
        let mut seq = IntervalSequencer::new(1_000)
            .unwrap()
            .with_on_finish(move |seq: &mut IntervalSequencer| {
                if let Some(next) = replacement.take() {
                    seq.set_on_finish(next);
                }
            });

        seq.do_tick(1_000);
        assert_eq!(finished(&replaced), 0);
        seq.do_tick(1_000);
        assert_eq!(finished(&replaced), 1);
    }
}
