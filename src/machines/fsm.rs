use std::fmt;

use crate::config::MachineConfig;
use crate::entities::{InputSnapshot, Kinematics, MachineKind};
use crate::machines::Controller;
use crate::physics;

/// The single active state of a [`FlatStateMachine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlatState {
    Idle,
    Walking,
    Jumping,
}

impl fmt::Display for FlatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Flat finite state machine: exactly one of Idle, Walking or Jumping.
///
/// Transitions are evaluated once per tick from the current state only,
/// so a state change takes effect on the following tick.
#[derive(Clone, Debug)]
pub struct FlatStateMachine {
    config: MachineConfig,
    kinematics: Kinematics,
    state: FlatState,
}

impl FlatStateMachine {
    pub fn new(config: MachineConfig) -> Self {
        Self {
            kinematics: physics::spawn(&config),
            config,
            state: FlatState::Idle,
        }
    }

    pub fn state(&self) -> FlatState {
        self.state
    }

    pub fn is_jumping(&self) -> bool {
        self.state == FlatState::Jumping
    }

    pub fn tick(&mut self, input: &InputSnapshot) {
        match self.state {
            FlatState::Idle => {
                if input.jump {
                    self.start_jump();
                } else if input.horizontal() {
                    self.go(FlatState::Walking);
                }
            }
            FlatState::Walking => {
                physics::walk(&mut self.kinematics, input, &self.config);
                if input.jump {
                    self.start_jump();
                } else if !input.horizontal() {
                    self.go(FlatState::Idle);
                }
            }
            FlatState::Jumping => {
                if physics::fall(&mut self.kinematics, &self.config) {
                    self.go(FlatState::Idle);
                }
            }
        }
    }

    fn start_jump(&mut self) {
        if self.is_jumping() {
            return;
        }
        physics::launch(&mut self.kinematics, &self.config);
        self.go(FlatState::Jumping);
    }

    fn go(&mut self, next: FlatState) {
        if next != self.state {
            log::debug!("fsm: {} -> {}", self.state, next);
            self.state = next;
        }
    }
}

impl Controller for FlatStateMachine {
    fn frame(&mut self, input: &InputSnapshot) {
        self.tick(input);
    }

    fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    fn config(&self) -> &MachineConfig {
        &self.config
    }

    fn state_label(&self) -> String {
        self.state.to_string()
    }

    fn kind(&self) -> MachineKind {
        MachineKind::Fsm
    }

    fn snapshot(&self) -> Box<dyn Controller> {
        Box::new(self.clone())
    }
}
