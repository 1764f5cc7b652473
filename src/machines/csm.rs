use crate::config::MachineConfig;
use crate::entities::{InputSnapshot, Kinematics, MachineKind};
use crate::machines::Controller;
use crate::physics;

/// Independent state flags.  Nothing links them: both may be set at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateFlags {
    pub walking: bool,
    pub jumping: bool,
}

/// Concurrent state machine: every region whose flag is set runs each tick,
/// with no priority between them.
#[derive(Clone, Debug)]
pub struct ConcurrentStateMachine {
    config: MachineConfig,
    kinematics: Kinematics,
    flags: StateFlags,
}

impl ConcurrentStateMachine {
    pub fn new(config: MachineConfig) -> Self {
        Self {
            kinematics: physics::spawn(&config),
            config,
            flags: StateFlags::default(),
        }
    }

    pub fn flags(&self) -> StateFlags {
        self.flags
    }

    pub fn start_walking(&mut self) {
        if !self.flags.walking {
            log::debug!("csm: walking on");
        }
        self.flags.walking = true;
    }

    pub fn stop_walking(&mut self) {
        if self.flags.walking {
            log::debug!("csm: walking off");
        }
        self.flags.walking = false;
    }

    /// Set the jumping flag with the jump velocity.  No-op while jumping.
    pub fn start_jumping(&mut self) {
        if self.flags.jumping {
            return;
        }
        self.flags.jumping = true;
        physics::launch(&mut self.kinematics, &self.config);
        log::debug!("csm: jumping on");
    }

    pub fn tick(&mut self, input: &InputSnapshot) {
        if self.flags.walking {
            physics::walk(&mut self.kinematics, input, &self.config);
        }

        if self.flags.jumping && physics::fall(&mut self.kinematics, &self.config) {
            self.flags.jumping = false;
            log::debug!("csm: landed, jumping off");
        }
    }
}

impl Controller for ConcurrentStateMachine {
    fn frame(&mut self, input: &InputSnapshot) {
        if input.horizontal() {
            self.start_walking();
        } else {
            self.stop_walking();
        }
        if input.jump && !self.flags.jumping {
            self.start_jumping();
        }
        self.tick(input);
    }

    fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    fn config(&self) -> &MachineConfig {
        &self.config
    }

    fn state_label(&self) -> String {
        match (self.flags.walking, self.flags.jumping) {
            (true, true) => "walking + jumping".to_string(),
            (true, false) => "walking".to_string(),
            (false, true) => "jumping".to_string(),
            (false, false) => "none".to_string(),
        }
    }

    fn kind(&self) -> MachineKind {
        MachineKind::Csm
    }

    fn snapshot(&self) -> Box<dyn Controller> {
        Box::new(self.clone())
    }
}
