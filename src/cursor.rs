//! Digit cursor for fixed-width `HHhMMmSSs` duration entry.
//!
//! The cursor owns nine slots laid out as two digit slots followed by one
//! unit label slot, repeated for hours, minutes and seconds. The selection
//! only ever rests on a digit slot: navigation that would land on a label is
//! deflected one more step in the direction of travel.
//!
//! Typing behaves like a right-to-left numeric entry field: every digit at or
//! before the selection moves one slot to the left and the new digit is
//! written at the selection. Backspace is the inverse shift.
//!
//! ### Example
//! ```rust
//! use bubbletea_countdown::cursor;
//!
//! let mut cur = cursor::new();
//! cur.activate();
//! cur.insert_digit(1).unwrap();
//! cur.insert_digit(3).unwrap();
//! cur.insert_digit(0).unwrap();
//!
//! let committed = cur.commit();
//! assert_eq!((committed.hours, committed.minutes, committed.seconds), (0, 1, 30));
//! assert_eq!(committed.milliseconds(), 90_000);
//! ```

use crate::error::{Result, TimerError};
use crate::time::{TimeValue, Unit};

/// Number of slots on the display.
pub const SLOT_COUNT: usize = 9;

/// Default selection: the ones place of the seconds group.
pub const STARTING_INDEX: usize = 7;

const LAST_DIGIT_INDEX: usize = SLOT_COUNT - 2;

/// Whether `index` addresses a digit slot rather than a unit label.
pub fn is_digit_index(index: usize) -> bool {
    (index + 1) % 3 != 0
}

// Keeps an index on a digit slot, deflecting away from labels in the
// direction of travel from `previous`.
fn bounded_index(index: usize, previous: usize) -> usize {
    if index > LAST_DIGIT_INDEX {
        return LAST_DIGIT_INDEX;
    }
    if is_digit_index(index) {
        return index;
    }
    if index > previous {
        index + 1
    } else {
        index - 1
    }
}

fn unit_at(index: usize) -> Unit {
    Unit::ALL[index / 3]
}

// --- Slots ---

/// One position on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// An editable decimal digit, `0..=9`.
    Digit(u8),
    /// A fixed unit glyph.
    Label(Unit),
}

impl Slot {
    /// Whether the slot is editable.
    pub fn is_digit(&self) -> bool {
        matches!(self, Slot::Digit(_))
    }

    /// Character shown for the slot.
    pub fn glyph(&self) -> char {
        match self {
            Slot::Digit(d) => char::from(b'0' + d),
            Slot::Label(unit) => unit.glyph(),
        }
    }
}

// --- Committed value ---

/// The three two-digit magnitudes read from the display.
///
/// Groups are not bounded to 60: a seconds pair of `99` carries through
/// conversion as 99 seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Committed {
    /// Hours pair, `0..=99`.
    pub hours: u8,
    /// Minutes pair, `0..=99`.
    pub minutes: u8,
    /// Seconds pair, `0..=99`.
    pub seconds: u8,
}

impl Committed {
    /// Magnitude entered for `unit`.
    pub fn get(&self, unit: Unit) -> u8 {
        match unit {
            Unit::Hour => self.hours,
            Unit::Minute => self.minutes,
            Unit::Second => self.seconds,
        }
    }

    /// Sum of every group converted to milliseconds.
    pub fn milliseconds(&self) -> i64 {
        Unit::ALL
            .iter()
            .map(|unit| TimeValue::convert_to_milliseconds(i64::from(self.get(*unit)), *unit))
            .sum()
    }

    /// Builds a [`TimeValue`] from the committed groups.
    pub fn to_time_value(&self) -> Result<TimeValue> {
        TimeValue::new(self.milliseconds())
    }
}

// --- Model ---

/// Selection and contents of the duration entry display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitCursor {
    slots: [Slot; SLOT_COUNT],
    selected: usize,
    active: bool,
}

impl Default for DigitCursor {
    fn default() -> Self {
        let mut slots = [Slot::Digit(0); SLOT_COUNT];
        for (i, slot) in slots.iter_mut().enumerate() {
            if !is_digit_index(i) {
                *slot = Slot::Label(unit_at(i));
            }
        }
        Self {
            slots,
            selected: STARTING_INDEX,
            active: false,
        }
    }
}

impl DigitCursor {
    /// Creates an inactive cursor with all digits zero and the selection on
    /// the ones place of the seconds group.
    pub fn new() -> Self {
        Self::default()
    }

    /// All slots, most significant first.
    pub fn slots(&self) -> &[Slot; SLOT_COUNT] {
        &self.slots
    }

    /// Index of the selected slot. Always a digit slot.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Whether navigation and edits are accepted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts accepting navigation and edits.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stops accepting navigation and edits.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Moves the selection one digit slot to the right. No-op on the last
    /// digit slot.
    pub fn select_next(&mut self) {
        if !self.active || self.selected == LAST_DIGIT_INDEX {
            return;
        }
        self.selected = bounded_index(self.selected + 1, self.selected);
    }

    /// Moves the selection one digit slot to the left. No-op on the first
    /// digit slot.
    pub fn select_previous(&mut self) {
        if !self.active || self.selected == 0 {
            return;
        }
        self.selected = bounded_index(self.selected - 1, self.selected);
    }

    /// Selects `index` directly. A label index is deflected relative to the
    /// current selection, the same way navigation is.
    pub fn set_index(&mut self, index: usize) -> Result<()> {
        check_index(index)?;
        if !self.active || index == self.selected {
            return Ok(());
        }
        self.selected = bounded_index(index, self.selected);
        Ok(())
    }

    /// Digit stored at `index`, or `None` for a label slot.
    pub fn digit_at(&self, index: usize) -> Result<Option<u8>> {
        check_index(index)?;
        Ok(match self.slots[index] {
            Slot::Digit(d) => Some(d),
            Slot::Label(_) => None,
        })
    }

    /// Types `digit` at the selection, shifting every digit at or before the
    /// selection one digit slot to the left. The most significant digit is
    /// dropped.
    pub fn insert_digit(&mut self, digit: u8) -> Result<()> {
        if digit > 9 {
            log::warn!("rejected digit {}", digit);
            return Err(TimerError::out_of_range("digit", i64::from(digit), 0, 10));
        }
        if !self.active {
            log::trace!("cursor inactive, ignoring digit {}", digit);
            return Ok(());
        }
        for i in 1..=self.selected {
            if is_digit_index(i) {
                self.slots[bounded_index(i - 1, i)] = self.slots[i];
            }
        }
        self.slots[self.selected] = Slot::Digit(digit);
        Ok(())
    }

    /// Deletes the digit at the selection, shifting every digit before it one
    /// digit slot to the right and zero-filling the most significant slot.
    pub fn backspace(&mut self) {
        if !self.active {
            return;
        }
        for i in (0..self.selected).rev() {
            if is_digit_index(i) {
                self.slots[bounded_index(i + 1, i)] = self.slots[i];
            }
        }
        self.slots[0] = Slot::Digit(0);
    }

    /// Resets every digit to zero.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            if slot.is_digit() {
                *slot = Slot::Digit(0);
            }
        }
    }

    /// Reads the hours, minutes and seconds pairs.
    pub fn commit(&self) -> Committed {
        Committed {
            hours: self.group(Unit::Hour),
            minutes: self.group(Unit::Minute),
            seconds: self.group(Unit::Second),
        }
    }

    /// The committed input in milliseconds.
    pub fn committed_milliseconds(&self) -> i64 {
        self.commit().milliseconds()
    }

    fn group(&self, unit: Unit) -> u8 {
        let first = unit.index() * 3;
        let digit = |i: usize| match self.slots[i] {
            Slot::Digit(d) => d,
            Slot::Label(_) => 0,
        };
        10 * digit(first) + digit(first + 1)
    }
}

fn check_index(index: usize) -> Result<()> {
    if index >= SLOT_COUNT {
        log::warn!("slot index {} out of bounds", index);
        return Err(TimerError::out_of_range(
            "slot index",
            index as i64,
            0,
            SLOT_COUNT as i64,
        ));
    }
    Ok(())
}

/// Create a new cursor. Equivalent to DigitCursor::new().
pub fn new() -> DigitCursor {
    DigitCursor::new()
}

// --- Rendering ---

/// One rendered display cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCell {
    /// Character to draw.
    pub glyph: char,
    /// Unit group the cell belongs to.
    pub unit: Unit,
    /// Whether the cell is an editable digit.
    pub digit: bool,
    /// Whether the cell carries the selection highlight.
    pub selected: bool,
}

/// Projection of a [`DigitCursor`] for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    /// Cells in display order.
    pub cells: Vec<DisplayCell>,
}

impl DisplayModel {
    /// Unstyled text of the display, e.g. `"00h01m30s"`.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.glyph).collect()
    }
}

/// Projects the cursor state into cells. The selection is only highlighted
/// while the cursor is active.
pub fn render(cursor: &DigitCursor) -> DisplayModel {
    let cells = cursor
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| DisplayCell {
            glyph: slot.glyph(),
            unit: unit_at(i),
            digit: slot.is_digit(),
            selected: cursor.active && i == cursor.selected,
        })
        .collect();
    DisplayModel { cells }
}
