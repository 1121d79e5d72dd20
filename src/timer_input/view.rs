//! Rendering for the timer input component.

use super::model::Model;
use crate::cursor::DisplayCell;
use lipgloss_extras::prelude::*;

/// Styles for the parts of a timer input.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Unselected digits.
    pub digit: Style,
    /// The selected digit while focused.
    pub selected: Style,
    /// Unit labels (`h`, `m`, `s`).
    pub label: Style,
    /// The running countdown.
    pub display: Style,
    /// The countdown while paused.
    pub paused: Style,
}

/// Default styles: reversed selection, dimmed labels, bold countdown.
pub fn default_styles() -> Styles {
    Styles {
        digit: Style::new(),
        selected: Style::new().reverse(true),
        label: Style::new().faint(true),
        display: Style::new().bold(true),
        paused: Style::new().faint(true),
    }
}

impl Default for Styles {
    fn default() -> Self {
        default_styles()
    }
}

impl Model {
    /// Renders the digit display when idle and the remaining time, e.g.
    /// `1m30s`, once started.
    pub fn view(&self) -> String {
        if self.countdown.started() {
            let remaining = self.countdown.view();
            let style = if self.countdown.paused() {
                &self.styles.paused
            } else {
                &self.styles.display
            };
            return style.clone().inline(true).render(&remaining);
        }

        self.display_model()
            .cells
            .iter()
            .map(|cell| self.render_cell(cell))
            .collect()
    }

    fn render_cell(&self, cell: &DisplayCell) -> String {
        let style = if cell.selected {
            &self.styles.selected
        } else if cell.digit {
            &self.styles.digit
        } else {
            &self.styles.label
        };
        style.clone().inline(true).render(&cell.glyph.to_string())
    }
}
