use std::fmt;

use crate::config::MachineConfig;
use crate::entities::{InputSnapshot, Kinematics, MachineKind, Projectile};
use crate::machines::Controller;
use crate::physics;

/// A label on the [`PushdownAutomaton`] stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PdaState {
    /// Bottom of the stack; never popped.
    Standing,
    WalkingLeft,
    WalkingRight,
    /// Airborne until landing, then pops itself.
    Jumping,
    /// Fires once, then pops itself.
    Firing,
}

impl fmt::Display for PdaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Pushdown automaton: a stack of states where only the top one runs.
///
/// Entering a state pushes it; leaving pops it, which hands control back
/// to whatever was underneath.  A jump started mid-walk therefore resumes
/// the walk on landing without storing a return state anywhere.
#[derive(Clone, Debug)]
pub struct PushdownAutomaton {
    config: MachineConfig,
    kinematics: Kinematics,
    stack: Vec<PdaState>,
    projectiles: Vec<Projectile>,
    shots_fired: u64,
}

impl PushdownAutomaton {
    pub fn new(config: MachineConfig) -> Self {
        Self {
            kinematics: physics::spawn(&config),
            config,
            stack: vec![PdaState::Standing],
            projectiles: Vec::new(),
            shots_fired: 0,
        }
    }

    /// The live state.
    pub fn top(&self) -> PdaState {
        self.stack.last().copied().unwrap_or(PdaState::Standing)
    }

    /// Bottom-to-top view of the stack.
    pub fn stack(&self) -> &[PdaState] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of times the firing state has run.
    pub fn shots_fired(&self) -> u64 {
        self.shots_fired
    }

    /// Put `state` on top of the stack.  It becomes live on the next tick.
    fn push(&mut self, state: PdaState) {
        debug_assert!(
            state != PdaState::Standing,
            "pda: Standing is only the bottom frame"
        );
        log::debug!("pda: push {} (depth {})", state, self.stack.len() + 1);
        self.stack.push(state);
    }

    /// Run the top state for one tick.
    ///
    /// Standing and the walking states check their push conditions
    /// independently, so several states can be pushed in a single tick
    /// (e.g. jump and fire held together).
    pub fn tick(&mut self, input: &InputSnapshot) {
        match self.top() {
            PdaState::Standing => {
                if input.move_left {
                    self.push(PdaState::WalkingLeft);
                } else if input.move_right {
                    self.push(PdaState::WalkingRight);
                }
                self.check_interrupts(input);
            }
            PdaState::WalkingLeft => {
                self.kinematics.x -= self.config.speed;
                if !input.move_left {
                    self.pop();
                }
                self.check_interrupts(input);
            }
            PdaState::WalkingRight => {
                self.kinematics.x += self.config.speed;
                if !input.move_right {
                    self.pop();
                }
                self.check_interrupts(input);
            }
            PdaState::Jumping => {
                if physics::fall(&mut self.kinematics, &self.config) {
                    self.pop();
                }
            }
            PdaState::Firing => {
                self.fire();
                self.pop();
            }
        }

        physics::advance_projectiles(&mut self.projectiles);
    }

    /// Jump and fire may interrupt standing or walking.
    fn check_interrupts(&mut self, input: &InputSnapshot) {
        if input.jump && physics::on_ground(&self.kinematics, &self.config) {
            self.push(PdaState::Jumping);
            physics::launch(&mut self.kinematics, &self.config);
        }
        if input.fire {
            self.push(PdaState::Firing);
        }
    }

    /// One-shot firing hook.
    fn fire(&mut self) {
        let projectile = physics::shoot(&self.kinematics, &self.config);
        log::debug!("pda: firing at ({}, {})", projectile.x, projectile.y);
        self.projectiles.push(projectile);
        self.shots_fired += 1;
    }

    fn pop(&mut self) {
        debug_assert!(
            self.stack.len() > 1,
            "pda: attempted to pop the Standing sentinel"
        );
        if self.stack.len() > 1 {
            if let Some(state) = self.stack.pop() {
                log::debug!("pda: pop {} -> {}", state, self.top());
            }
        } else {
            log::error!("pda: refused to pop the Standing sentinel");
        }
    }
}

impl Controller for PushdownAutomaton {
    fn frame(&mut self, input: &InputSnapshot) {
        self.tick(input);
    }

    fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    fn config(&self) -> &MachineConfig {
        &self.config
    }

    fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    fn state_label(&self) -> String {
        self.stack
            .iter()
            .map(PdaState::to_string)
            .collect::<Vec<_>>()
            .join(" > ")
    }

    fn kind(&self) -> MachineKind {
        MachineKind::Pda
    }

    fn snapshot(&self) -> Box<dyn Controller> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pda() -> PushdownAutomaton {
        PushdownAutomaton::new(MachineConfig::default())
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Standing sentinel")]
    fn popping_the_sentinel_panics_in_debug() {
        make_pda().pop();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "only the bottom frame")]
    fn pushing_a_second_standing_panics_in_debug() {
        make_pda().push(PdaState::Standing);
    }

    #[test]
    fn pushed_firing_runs_once_on_next_tick() {
        let mut pda = make_pda();
        pda.tick(&InputSnapshot::right());
        pda.push(PdaState::Firing);
        assert_eq!(pda.depth(), 3);

        pda.tick(&InputSnapshot::right());
        assert_eq!(pda.depth(), 2);
        assert_eq!(pda.top(), PdaState::WalkingRight);
        assert_eq!(pda.shots_fired(), 1);
    }
}
