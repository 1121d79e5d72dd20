//! Tests for the timer input component.

use super::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::{CountdownState, TickOutcome, TimeoutMsg};
    use crate::cursor::STARTING_INDEX;
    use crate::error::TimerError;
    use crate::key::Input;
    use crate::Component;
    use bubbletea_rs::{KeyMsg, Msg};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::time::Duration;

    fn focused() -> Model {
        let mut m = new();
        m.focus();
        m
    }

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_keys(m: &mut Model, names: &[&str]) {
        for name in names {
            m.feed_key(Input::from_key_name(name).expect("known key"));
        }
    }

    #[test]
    fn test_new_default_values() {
        let m = new();
        assert!(!m.focused());
        assert!(!m.started());
        assert!(!m.finished());
        assert_eq!(m.current_index(), STARTING_INDEX);
        assert_eq!(m.time(), 0);
        assert_eq!(m.display_model().text(), "00h00m00s");
    }

    #[test]
    fn test_focus_activates_cursor() {
        let mut m = new();
        assert!(m.focus().is_none());
        assert!(m.cursor().is_active());
        m.blur();
        assert!(!m.focused());
        assert!(!m.cursor().is_active());
    }

    #[test]
    fn test_unfocused_ignores_input() {
        let mut m = new();
        type_keys(&mut m, &["5", "ArrowLeft", "Enter"]);
        assert_eq!(m.time(), 0);
        assert_eq!(m.current_index(), STARTING_INDEX);
        assert!(!m.started());
    }

    #[test]
    fn test_feed_key_types_duration() {
        let mut m = focused();
        type_keys(&mut m, &["1", "0", "2", "0", "3", "0"]);
        assert_eq!(m.display_model().text(), "10h20m30s");
        assert_eq!(m.time(), 10 * 3_600_000 + 20 * 60_000 + 30_000);
    }

    #[test]
    fn test_feed_key_navigation_and_backspace() {
        let mut m = focused();
        type_keys(&mut m, &["1", "2", "3", "4"]);
        type_keys(&mut m, &["ArrowLeft", "ArrowLeft"]);
        assert_eq!(m.current_index(), 4);
        type_keys(&mut m, &["Backspace"]);
        assert_eq!(m.display_model().text(), "00h01m34s");
        type_keys(&mut m, &["ArrowRight", "ArrowRight", "ArrowRight"]);
        assert_eq!(m.current_index(), 7);
    }

    #[test]
    fn test_confirm_starts_countdown() {
        let mut m = focused();
        type_keys(&mut m, &["4", "0", "Enter"]);
        assert!(m.started());
        assert!(m.running());
        assert_eq!(m.countdown().remaining().milliseconds(), 40_000);
        assert_eq!(m.countdown().view(), "40s");
    }

    #[test]
    fn test_edits_ignored_while_started() {
        let mut m = focused();
        type_keys(&mut m, &["4", "Enter", "9", "Backspace"]);
        assert_eq!(m.time(), 4_000);
        assert_eq!(m.countdown().duration().milliseconds(), 4_000);
    }

    #[test]
    fn test_start_twice_fails() {
        let mut m = focused();
        m.start().unwrap();
        assert_eq!(m.start(), Err(TimerError::AlreadyRunning));
    }

    #[test]
    fn test_tick_finishes_and_sets_flag() {
        let mut m = focused();
        type_keys(&mut m, &["2", "Enter"]);
        assert_eq!(m.tick(Duration::from_secs(1)), TickOutcome::Counting);
        assert!(!m.finished());
        assert_eq!(m.tick(Duration::from_secs(1)), TickOutcome::Finished);
        assert!(m.finished());
        assert!(!m.started());

        // the next start clears the flag
        m.start().unwrap();
        assert!(!m.finished());
    }

    #[test]
    fn test_stop_is_not_finished() {
        let mut m = focused();
        type_keys(&mut m, &["2", "Enter"]);
        m.stop().unwrap();
        assert!(!m.finished());
        assert!(!m.started());
        assert_eq!(m.stop(), Err(TimerError::NotRunning));
    }

    #[test]
    fn test_press_start_toggles_pause() {
        let mut m = focused();
        type_keys(&mut m, &["5"]);
        m.press_start();
        assert!(m.running());
        m.press_start();
        assert!(m.paused());
        assert_eq!(m.tick(Duration::from_secs(1)), TickOutcome::Ignored);
        m.press_start();
        assert!(m.running());
    }

    #[test]
    fn test_press_reset_stops_then_clears() {
        let mut m = focused();
        type_keys(&mut m, &["5", "Enter"]);
        m.tick(Duration::from_secs(2));

        m.press_reset();
        assert!(!m.started());
        assert!(!m.finished());
        // the entered duration survives a reset
        assert_eq!(m.time(), 5_000);
        assert_eq!(m.countdown().remaining().milliseconds(), 5_000);

        m.press_reset();
        assert_eq!(m.time(), 0);
    }

    #[test]
    fn test_reset_when_idle_fails() {
        let mut m = focused();
        assert_eq!(m.reset(), Err(TimerError::NotRunning));
    }

    #[test]
    fn test_overflowed_groups_carry() {
        let mut m = focused();
        type_keys(&mut m, &["9", "9"]);
        assert_eq!(m.time(), 99_000);
        m.start().unwrap();
        assert_eq!(m.countdown().view(), "1m39s");
    }

    #[test]
    fn test_update_key_messages() {
        let mut m = focused();
        assert!(m.update(key(KeyCode::Char('3'))).is_none());
        assert!(m.update(key(KeyCode::Left)).is_none());
        assert_eq!(m.current_index(), 6);
        assert!(m.update(key(KeyCode::Char('x'))).is_none());
        assert_eq!(m.time(), 3_000);

        // starting returns the first tick command
        assert!(m.update(key(KeyCode::Enter)).is_some());
        assert_eq!(m.countdown().state(), CountdownState::Running);
    }

    #[test]
    fn test_update_buttons() {
        let mut m = focused();
        m.update(key(KeyCode::Char('1')));
        assert!(m.update(key(KeyCode::Char(' '))).is_some());
        assert!(m.running());
        assert!(m.update(key(KeyCode::Char(' '))).is_none());
        assert!(m.paused());
        // resuming starts a fresh tick chain
        assert!(m.update(key(KeyCode::Char(' '))).is_some());
        assert!(m.update(key(KeyCode::Esc)).is_none());
        assert!(!m.started());
        m.update(key(KeyCode::Esc));
        assert_eq!(m.time(), 0);
    }

    #[test]
    fn test_update_ignores_keys_when_blurred() {
        let mut m = new();
        assert!(m.update(key(KeyCode::Char('1'))).is_none());
        assert!(m.update(key(KeyCode::Enter)).is_none());
        assert_eq!(m.time(), 0);
        assert!(!m.started());
    }

    #[test]
    fn test_update_timeout_sets_finished() {
        let mut m = focused();
        let id = m.countdown().id();
        m.update(Box::new(TimeoutMsg { id: id + 1 }));
        assert!(!m.finished());
        m.update(Box::new(TimeoutMsg { id }));
        assert!(m.finished());
    }

    #[test]
    fn test_key_map_resolve() {
        let km = default_key_map();
        let msg = KeyMsg {
            key: KeyCode::Char('8'),
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(km.resolve(&msg), Some(Input::Digit(8)));
        let msg = KeyMsg {
            key: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(km.resolve(&msg), Some(Input::Next));
        let msg = KeyMsg {
            key: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(km.resolve(&msg), None);
    }

    #[test]
    fn test_view_switches_to_countdown() {
        let mut m = focused();
        type_keys(&mut m, &["1", "3", "0"]);
        assert!(m.view().contains('h'));

        m.start().unwrap();
        assert!(m.view().contains("1m30s"));
        m.tick(Duration::from_secs(30));
        assert!(m.view().contains("1m0s"));
        assert!(!m.view().contains('h'));
    }

    #[test]
    fn test_display_model_follows_selection() {
        let mut m = focused();
        m.feed_key(Input::Previous);
        let selected: Vec<usize> = m
            .display_model()
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.selected)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(selected, vec![6]);

        m.blur();
        assert!(m.display_model().cells.iter().all(|c| !c.selected));
    }
}
