//! Undo/redo over whole-controller snapshots.
//!
//! Every frame driven by a held key counts as a command.  Before such a
//! frame runs, [`History::commit`] stores a snapshot of the controller and
//! drops the redo stack.  Frames with no keys held are not commands: they
//! neither record nor clear redo, so gravity can keep running between an
//! undo and the matching redo.

use std::collections::VecDeque;

use crate::entities::InputSnapshot;
use crate::machines::Controller;

/// Snapshots kept before the oldest is forgotten (~20 s at 30 FPS).
pub const DEFAULT_CAPACITY: usize = 600;

pub struct History {
    undo: VecDeque<Box<dyn Controller>>,
    redo: Vec<Box<dyn Controller>>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record `machine` as it is before running a frame with `input`.
    /// Returns whether the frame counted as a command.
    pub fn commit(&mut self, machine: &dyn Controller, input: &InputSnapshot) -> bool {
        if *input == InputSnapshot::IDLE {
            return false;
        }
        if self.undo.len() == self.capacity {
            self.undo.pop_front();
        }
        self.undo.push_back(machine.snapshot());
        self.redo.clear();
        true
    }

    /// Swap `machine` for the snapshot taken before the last command.
    /// The replaced machine goes onto the redo stack.
    pub fn undo(&mut self, machine: &mut Box<dyn Controller>) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        let current = std::mem::replace(machine, previous);
        self.redo.push(current);
        log::debug!("history: undo ({} left)", self.undo.len());
        true
    }

    /// Reverse the last undo.
    pub fn redo(&mut self, machine: &mut Box<dyn Controller>) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(machine, next);
        if self.undo.len() == self.capacity {
            self.undo.pop_front();
        }
        self.undo.push_back(current);
        log::debug!("history: redo ({} left)", self.redo.len());
        true
    }

    /// Forget everything, e.g. after switching controller kind.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}
