/// Turns terminal key events into per-frame [`InputSnapshot`]s.
///
/// Instead of acting on each key event individually, the tracker records
/// the frame of the last press/repeat event for every key and reports a key
/// as held while that frame is recent enough.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol etc.): proper
///   `Press` / `Repeat` / `Release` events, so keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` frames of silence,
///   which is shorter than the OS repeat interval.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEventKind};

use crate::entities::InputSnapshot;

/// A key counts as held if it was seen within this many frames.
pub const HOLD_WINDOW: u64 = 4;

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const JUMP_KEYS: [KeyCode; 4] = [
    KeyCode::Char(' '),
    KeyCode::Up,
    KeyCode::Char('w'),
    KeyCode::Char('W'),
];
const FIRE_KEYS: [KeyCode; 3] = [KeyCode::Enter, KeyCode::Char('f'), KeyCode::Char('F')];

#[derive(Debug, Default, Clone)]
pub struct KeyTracker {
    last_seen: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one key event observed during `frame`.
    pub fn observe(&mut self, code: KeyCode, kind: KeyEventKind, frame: u64) {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(code, frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&code);
            }
        }
    }

    /// True if `code` was pressed or repeated within the last `HOLD_WINDOW`
    /// frames and not released since.
    pub fn is_held(&self, code: &KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(code)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, codes: &[KeyCode], frame: u64) -> bool {
        codes.iter().any(|code| self.is_held(code, frame))
    }

    /// The held-key snapshot for `frame`.
    pub fn snapshot(&self, frame: u64) -> InputSnapshot {
        InputSnapshot {
            move_left: self.any_held(&LEFT_KEYS, frame),
            move_right: self.any_held(&RIGHT_KEYS, frame),
            jump: self.any_held(&JUMP_KEYS, frame),
            fire: self.any_held(&FIRE_KEYS, frame),
        }
    }

    /// Forget every key, e.g. when switching controllers.
    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}
