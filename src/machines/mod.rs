//! The four interchangeable character controllers.

mod csm;
mod fsm;
mod hsm;
mod pda;

pub use csm::{ConcurrentStateMachine, StateFlags};
pub use fsm::{FlatState, FlatStateMachine};
pub use hsm::{HierarchicalStateMachine, StateNode, IDLE, JUMPING, SHOOTING, WALKING};
pub use pda::{PdaState, PushdownAutomaton};

use crate::config::MachineConfig;
use crate::entities::{InputSnapshot, Kinematics, MachineKind, Projectile};

/// What the game loop and the renderer need from any controller.
pub trait Controller {
    /// Advance one frame with the keys held this frame.
    ///
    /// Machines whose transitions are requested from outside (HSM, CSM)
    /// issue those requests from the held keys first, then tick.
    fn frame(&mut self, input: &InputSnapshot);

    fn kinematics(&self) -> &Kinematics;

    fn config(&self) -> &MachineConfig;

    /// Projectiles fired so far; empty for machines that cannot shoot.
    fn projectiles(&self) -> &[Projectile] {
        &[]
    }

    /// Human-readable summary of the active state(s).
    fn state_label(&self) -> String;

    fn kind(&self) -> MachineKind;

    /// Boxed copy of the whole machine, used by the undo history.
    fn snapshot(&self) -> Box<dyn Controller>;
}

/// Construct a controller of the given kind at rest on the ground.
pub fn build(kind: MachineKind, config: &MachineConfig) -> Box<dyn Controller> {
    log::debug!("building {} controller", kind);
    match kind {
        MachineKind::Fsm => Box::new(FlatStateMachine::new(*config)),
        MachineKind::Hsm => Box::new(HierarchicalStateMachine::new(*config)),
        MachineKind::Csm => Box::new(ConcurrentStateMachine::new(*config)),
        MachineKind::Pda => Box::new(PushdownAutomaton::new(*config)),
    }
}
