/// Data shared by every controller. Pure data, no logic.

use std::fmt;

use clap::ValueEnum;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Keys held during one tick.  Built once per frame by the input
/// collaborator and read-only for the duration of the tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub fire: bool,
}

impl InputSnapshot {
    /// No keys held.
    pub const IDLE: InputSnapshot = InputSnapshot {
        move_left: false,
        move_right: false,
        jump: false,
        fire: false,
    };

    /// True when either horizontal key is held.
    pub fn horizontal(&self) -> bool {
        self.move_left || self.move_right
    }

    pub fn left() -> Self {
        Self {
            move_left: true,
            ..Self::IDLE
        }
    }

    pub fn right() -> Self {
        Self {
            move_right: true,
            ..Self::IDLE
        }
    }

    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Self::IDLE
        }
    }

    pub fn fire() -> Self {
        Self {
            fire: true,
            ..Self::IDLE
        }
    }

    /// Returns a copy with the jump key also held.
    pub fn with_jump(self) -> Self {
        Self {
            jump: true,
            ..self
        }
    }

    /// Returns a copy with the fire key also held.
    pub fn with_fire(self) -> Self {
        Self {
            fire: true,
            ..self
        }
    }
}

// ── Kinematics ────────────────────────────────────────────────────────────────

/// Position and vertical velocity of the character, in pixels.
///
/// Screen coordinates: `y` grows downwards, so the ground is the largest
/// `y` the character can have and a jump starts with negative velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    pub x: f64,
    pub y: f64,
    pub vertical_velocity: f64,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A shot travelling horizontally.  Never culled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    /// Horizontal distance added every tick.
    pub speed: f64,
}

// ── Machine selection ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum MachineKind {
    /// Flat finite state machine.
    Fsm,
    /// Hierarchical state machine with orthogonal regions.
    Hsm,
    /// Concurrent state flags.
    Csm,
    /// Pushdown automaton (stack of states).
    Pda,
}

impl MachineKind {
    pub const ALL: [MachineKind; 4] = [
        MachineKind::Fsm,
        MachineKind::Hsm,
        MachineKind::Csm,
        MachineKind::Pda,
    ];

    /// The kind after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            MachineKind::Fsm => MachineKind::Hsm,
            MachineKind::Hsm => MachineKind::Csm,
            MachineKind::Csm => MachineKind::Pda,
            MachineKind::Pda => MachineKind::Fsm,
        }
    }
}

impl fmt::Display for MachineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MachineKind::Fsm => "FSM",
            MachineKind::Hsm => "HSM",
            MachineKind::Csm => "CSM",
            MachineKind::Pda => "PDA",
        };
        f.write_str(name)
    }
}
