//! Recorded input macros replayed one snapshot every few frames.
//!
//! While idle, snapshots are appended to the recording.  Starting
//! execution copies the recording into a separate queue, so the recording
//! survives replay and can be run again.

use std::collections::VecDeque;

use crate::entities::InputSnapshot;

pub const DEFAULT_FRAME_DELAY: u32 = 25;
pub const MIN_FRAME_DELAY: u32 = 5;
pub const MAX_FRAME_DELAY: u32 = 60;
pub const FRAME_DELAY_STEP: u32 = 5;

#[derive(Debug, Clone)]
pub struct InputMacro {
    recorded: VecDeque<InputSnapshot>,
    execution: Option<VecDeque<InputSnapshot>>,
    paused: bool,
    frame_counter: u32,
    frame_delay: u32,
}

impl Default for InputMacro {
    fn default() -> Self {
        Self {
            recorded: VecDeque::new(),
            execution: None,
            paused: false,
            frame_counter: 0,
            frame_delay: DEFAULT_FRAME_DELAY,
        }
    }
}

impl InputMacro {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `input` to the recording.  Ignored while executing.
    pub fn record(&mut self, input: InputSnapshot) {
        if self.is_executing() {
            return;
        }
        self.recorded.push_back(input);
    }

    /// Drop the recording.  Ignored while executing.
    pub fn clear(&mut self) {
        if self.is_executing() {
            return;
        }
        self.recorded.clear();
    }

    /// Begin replaying a copy of the recording.  No-op when there is
    /// nothing recorded or a replay is already running.
    pub fn start(&mut self) {
        if self.is_executing() || self.recorded.is_empty() {
            return;
        }
        log::debug!("macro: executing {} inputs", self.recorded.len());
        self.execution = Some(self.recorded.clone());
        self.frame_counter = 0;
        self.paused = false;
    }

    /// Pause or resume a running replay.
    pub fn toggle_pause(&mut self) {
        if self.is_executing() {
            self.paused = !self.paused;
        }
    }

    /// Shorten the delay between replayed inputs.
    pub fn faster(&mut self) {
        self.frame_delay = self
            .frame_delay
            .saturating_sub(FRAME_DELAY_STEP)
            .max(MIN_FRAME_DELAY);
    }

    /// Lengthen the delay between replayed inputs.
    pub fn slower(&mut self) {
        self.frame_delay = (self.frame_delay + FRAME_DELAY_STEP).min(MAX_FRAME_DELAY);
    }

    /// Advance one frame of replay.  Returns the input due this frame, if
    /// any.  Replay ends once the execution queue is empty.
    pub fn poll(&mut self) -> Option<InputSnapshot> {
        if self.paused {
            return None;
        }
        let queue = self.execution.as_mut()?;

        self.frame_counter += 1;
        let mut due = None;
        if self.frame_counter >= self.frame_delay {
            due = queue.pop_front();
            self.frame_counter = 0;
        }

        if queue.is_empty() {
            log::debug!("macro: execution finished");
            self.execution = None;
        }
        due
    }

    pub fn is_executing(&self) -> bool {
        self.execution.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn frame_delay(&self) -> u32 {
        self.frame_delay
    }

    pub fn recorded(&self) -> impl Iterator<Item = &InputSnapshot> {
        self.recorded.iter()
    }

    pub fn recorded_len(&self) -> usize {
        self.recorded.len()
    }

    /// Inputs still waiting to be replayed.
    pub fn pending(&self) -> usize {
        self.execution.as_ref().map_or(0, VecDeque::len)
    }
}
