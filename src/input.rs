//! Keyboard and gesture input, folded into one `TickInput` per tick.
//!
//! Terminals differ in what they report: keyboard-enhanced terminals send
//! Press/Repeat/Release, classic ones only send repeated Press events while a
//! key is down. A key therefore counts as held while its last press or
//! repeat is at most `HOLD_WINDOW_TICKS` old, or until its release arrives.
//!
//! A press only counts as fresh (a restart) when no jump press or repeat was
//! seen for `REPEAT_DELAY_TICKS`, which covers the OS delay before the first
//! auto-repeat of a key that never went up.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::runner::TickInput;

/// ~130ms at 60 ticks/s, longer than the OS key-repeat interval.
pub const HOLD_WINDOW_TICKS: u64 = 8;

/// ~650ms at 60 ticks/s, longer than the usual delay before auto-repeat starts.
pub const REPEAT_DELAY_TICKS: u64 = 40;

/// UI-agnostic meaning of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Jump, // Space or Up arrow
    Quit, // q, Esc, Ctrl-C
    Other,
}

pub fn map_key(key: &KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => KeyAction::Jump,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Other,
    }
}

#[derive(Debug, Default)]
pub struct InputSampler {
    tick: u64,
    /// Tick of the last jump press or repeat, cleared on release.
    jump_seen_at: Option<u64>,
    /// A jump press arrived this tick that was not an auto-repeat.
    fresh_press: bool,
    gesture_was_active: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event for the current tick and return what it means.
    pub fn handle_key(&mut self, key: &KeyEvent) -> KeyAction {
        let action = map_key(key);
        if action == KeyAction::Jump {
            match key.kind {
                KeyEventKind::Press => {
                    if !self.jump_seen_within(REPEAT_DELAY_TICKS) {
                        self.fresh_press = true;
                    }
                    self.jump_seen_at = Some(self.tick);
                }
                KeyEventKind::Repeat => self.jump_seen_at = Some(self.tick),
                KeyEventKind::Release => self.jump_seen_at = None,
            }
        }
        action
    }

    fn jump_seen_within(&self, ticks: u64) -> bool {
        self.jump_seen_at
            .map(|seen| self.tick.saturating_sub(seen) <= ticks)
            .unwrap_or(false)
    }

    fn jump_held(&self) -> bool {
        self.jump_seen_within(HOLD_WINDOW_TICKS)
    }

    /// Close the current tick. `gesture_active` is this tick's sample of
    /// the gesture feed.
    ///
    /// Jump is "held key or open palm"; restart is a fresh key press or the
    /// moment the palm opens.
    pub fn sample(&mut self, gesture_active: bool) -> TickInput {
        let input = TickInput {
            jump: self.jump_held() || gesture_active,
            restart: self.fresh_press || (gesture_active && !self.gesture_was_active),
        };
        self.fresh_press = false;
        self.gesture_was_active = gesture_active;
        self.tick += 1;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    fn space(kind: KeyEventKind) -> KeyEvent {
        key(KeyCode::Char(' '), kind)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(&space(KeyEventKind::Press)), KeyAction::Jump);
        assert_eq!(
            map_key(&key(KeyCode::Up, KeyEventKind::Press)),
            KeyAction::Jump
        );
        assert_eq!(
            map_key(&key(KeyCode::Esc, KeyEventKind::Press)),
            KeyAction::Quit
        );
        assert_eq!(
            map_key(&key(KeyCode::Char('q'), KeyEventKind::Press)),
            KeyAction::Quit
        );
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(
            map_key(&key(KeyCode::Char('c'), KeyEventKind::Press)),
            KeyAction::Other
        );
    }

    #[test]
    fn test_idle_sample() {
        let mut sampler = InputSampler::new();
        assert_eq!(sampler.sample(false), TickInput::default());
    }

    #[test]
    fn test_press_is_jump_and_restart_once() {
        let mut sampler = InputSampler::new();
        sampler.handle_key(&space(KeyEventKind::Press));
        let first = sampler.sample(false);
        assert!(first.jump);
        assert!(first.restart);

        let second = sampler.sample(false);
        assert!(second.jump, "still inside the hold window");
        assert!(!second.restart);
    }

    #[test]
    fn test_hold_window_expires() {
        let mut sampler = InputSampler::new();
        sampler.handle_key(&space(KeyEventKind::Press));
        for _ in 0..=HOLD_WINDOW_TICKS {
            assert!(sampler.sample(false).jump);
        }
        assert!(!sampler.sample(false).jump);
    }

    #[test]
    fn test_auto_repeat_press_is_not_fresh() {
        let mut sampler = InputSampler::new();
        sampler.handle_key(&space(KeyEventKind::Press));
        sampler.sample(false);
        sampler.sample(false);
        // Classic terminals report key repeat as another Press.
        sampler.handle_key(&space(KeyEventKind::Press));
        let input = sampler.sample(false);
        assert!(input.jump);
        assert!(!input.restart);
    }

    #[test]
    fn test_first_auto_repeat_after_hold_window_is_not_fresh() {
        let mut sampler = InputSampler::new();
        sampler.handle_key(&space(KeyEventKind::Press));
        assert!(sampler.sample(false).restart);

        // Key still down, OS has not started repeating yet.
        for _ in 0..29 {
            assert!(!sampler.sample(false).restart);
        }
        assert!(!sampler.sample(false).jump, "hold window has lapsed");

        // Classic terminals report the first repeat as another Press.
        sampler.handle_key(&space(KeyEventKind::Press));
        let input = sampler.sample(false);
        assert!(input.jump);
        assert!(!input.restart);
    }

    #[test]
    fn test_press_after_long_pause_is_fresh() {
        let mut sampler = InputSampler::new();
        sampler.handle_key(&space(KeyEventKind::Press));
        sampler.sample(false);
        for _ in 0..=REPEAT_DELAY_TICKS {
            sampler.sample(false);
        }
        sampler.handle_key(&space(KeyEventKind::Press));
        assert!(sampler.sample(false).restart);
    }

    #[test]
    fn test_release_ends_hold() {
        let mut sampler = InputSampler::new();
        sampler.handle_key(&space(KeyEventKind::Press));
        sampler.sample(false);
        sampler.handle_key(&space(KeyEventKind::Repeat));
        assert!(sampler.sample(false).jump);
        sampler.handle_key(&space(KeyEventKind::Release));
        assert!(!sampler.sample(false).jump);

        // Pressing again after a release is fresh.
        sampler.handle_key(&space(KeyEventKind::Press));
        assert!(sampler.sample(false).restart);
    }

    #[test]
    fn test_gesture_holds_jump_and_restarts_on_rising_edge() {
        let mut sampler = InputSampler::new();
        let rising = sampler.sample(true);
        assert!(rising.jump);
        assert!(rising.restart);

        let held = sampler.sample(true);
        assert!(held.jump);
        assert!(!held.restart);

        let released = sampler.sample(false);
        assert!(!released.jump);
        assert!(sampler.sample(true).restart);
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut sampler = InputSampler::new();
        assert_eq!(
            sampler.handle_key(&key(KeyCode::Char('x'), KeyEventKind::Press)),
            KeyAction::Other
        );
        assert_eq!(sampler.sample(false), TickInput::default());
    }
}
