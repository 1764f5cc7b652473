use std::collections::BTreeMap;

use crate::config::MachineConfig;
use crate::entities::{InputSnapshot, Kinematics, MachineKind, Projectile};
use crate::machines::Controller;
use crate::physics;

pub const IDLE: &str = "idle";
pub const WALKING: &str = "walking";
pub const JUMPING: &str = "jumping";
pub const SHOOTING: &str = "shooting";

/// One node of the state tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateNode {
    pub active: bool,
    pub substates: BTreeMap<&'static str, StateNode>,
}

impl StateNode {
    fn leaf(active: bool) -> Self {
        Self {
            active,
            substates: BTreeMap::new(),
        }
    }

    /// Deactivate this node and everything nested in it.
    fn deactivate(&mut self) {
        self.active = false;
        for child in self.substates.values_mut() {
            child.deactivate();
        }
    }
}

/// Hierarchical state machine with three orthogonal regions:
///
/// * `idle`, with `walking` nested inside it,
/// * `jumping`,
/// * `shooting`.
///
/// Transitions are requested from outside through the `start_*`/`stop_*`
/// methods; [`tick`](Self::tick) only runs the behaviour of whichever
/// regions are active.
///
/// The shooting region is armed by [`start_shooting`](Self::start_shooting)
/// and fires one projectile on the next tick, but the region itself stays
/// active afterwards.  A caller that only arms while the region is inactive
/// therefore gets exactly one shot per playthrough.
#[derive(Clone, Debug)]
pub struct HierarchicalStateMachine {
    config: MachineConfig,
    kinematics: Kinematics,
    regions: BTreeMap<&'static str, StateNode>,
    shot_armed: bool,
    projectiles: Vec<Projectile>,
}

impl HierarchicalStateMachine {
    pub fn new(config: MachineConfig) -> Self {
        let mut idle = StateNode::leaf(true);
        idle.substates.insert(WALKING, StateNode::leaf(false));

        let mut regions = BTreeMap::new();
        regions.insert(IDLE, idle);
        regions.insert(JUMPING, StateNode::leaf(false));
        regions.insert(SHOOTING, StateNode::leaf(false));

        Self {
            kinematics: physics::spawn(&config),
            config,
            regions,
            shot_armed: false,
            projectiles: Vec::new(),
        }
    }

    /// The top-level regions of the tree.
    pub fn regions(&self) -> &BTreeMap<&'static str, StateNode> {
        &self.regions
    }

    /// True when the node at `path` and all of its ancestors are active.
    pub fn is_active(&self, path: &[&'static str]) -> bool {
        let Some((first, rest)) = path.split_first() else {
            return false;
        };
        let mut node = match self.regions.get(first) {
            Some(node) if node.active => node,
            _ => return false,
        };
        for name in rest {
            node = match node.substates.get(name) {
                Some(child) if child.active => child,
                _ => return false,
            };
        }
        true
    }

    pub fn is_idle(&self) -> bool {
        self.is_active(&[IDLE])
    }

    pub fn is_walking(&self) -> bool {
        self.is_active(&[IDLE, WALKING])
    }

    pub fn is_jumping(&self) -> bool {
        self.is_active(&[JUMPING])
    }

    pub fn is_shooting(&self) -> bool {
        self.is_active(&[SHOOTING])
    }

    /// True while a shot is armed but not yet fired.
    pub fn shot_armed(&self) -> bool {
        self.shot_armed
    }

    // ── Transition requests ──────────────────────────────────────────────────

    /// Enter `walking`, entering its parent `idle` region first if needed.
    pub fn start_walking(&mut self) {
        let idle = self.region_mut(IDLE);
        idle.active = true;
        let walking = idle
            .substates
            .entry(WALKING)
            .or_insert_with(|| StateNode::leaf(false));
        if !walking.active {
            walking.active = true;
            log::debug!("hsm: enter idle/walking");
        }
    }

    /// Leave `walking`; the `idle` region stays active.
    pub fn stop_walking(&mut self) {
        let idle = self.region_mut(IDLE);
        idle.active = true;
        if let Some(walking) = idle.substates.get_mut(WALKING) {
            if walking.active {
                walking.deactivate();
                log::debug!("hsm: exit idle/walking");
            }
        }
    }

    /// Activate or deactivate the whole `idle` region.  Deactivating it
    /// also deactivates every nested state.
    pub fn set_idle_active(&mut self, active: bool) {
        let idle = self.region_mut(IDLE);
        if active {
            idle.active = true;
        } else {
            idle.deactivate();
        }
        log::debug!("hsm: idle region active={}", active);
    }

    /// Enter `jumping` with the jump velocity.  No-op while already jumping.
    pub fn start_jumping(&mut self) {
        if self.is_jumping() {
            return;
        }
        self.region_mut(JUMPING).active = true;
        physics::launch(&mut self.kinematics, &self.config);
        log::debug!("hsm: enter jumping");
    }

    /// Activate `shooting` and arm one shot for the next tick.
    pub fn start_shooting(&mut self) {
        self.region_mut(SHOOTING).active = true;
        self.shot_armed = true;
        log::debug!("hsm: shot armed");
    }

    // ── Per-tick behaviour ───────────────────────────────────────────────────

    pub fn tick(&mut self, input: &InputSnapshot) {
        if self.is_walking() {
            physics::walk(&mut self.kinematics, input, &self.config);
        }

        if self.is_jumping() && physics::fall(&mut self.kinematics, &self.config) {
            self.region_mut(JUMPING).deactivate();
            log::debug!("hsm: landed, exit jumping");
        }

        if self.is_shooting() && self.shot_armed {
            let projectile = physics::shoot(&self.kinematics, &self.config);
            log::debug!("hsm: fired projectile at ({}, {})", projectile.x, projectile.y);
            self.projectiles.push(projectile);
            self.shot_armed = false;
        }

        physics::advance_projectiles(&mut self.projectiles);
    }

    fn region_mut(&mut self, name: &'static str) -> &mut StateNode {
        self.regions.entry(name).or_default()
    }
}

impl Controller for HierarchicalStateMachine {
    fn frame(&mut self, input: &InputSnapshot) {
        if input.horizontal() {
            self.start_walking();
        } else {
            self.stop_walking();
        }
        if input.jump && !self.is_jumping() {
            self.start_jumping();
        }
        if input.fire && !self.is_shooting() {
            self.start_shooting();
        }
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
        let mut label = String::from(if self.is_walking() {
            "idle/walking"
        } else if self.is_idle() {
            "idle"
        } else {
            "-"
        });
        if self.is_jumping() {
            label.push_str(" + jumping");
        }
        if self.is_shooting() {
            label.push_str(" + shooting");
        }
        label
    }

    fn kind(&self) -> MachineKind {
        MachineKind::Hsm
    }

    fn snapshot(&self) -> Box<dyn Controller> {
        Box::new(self.clone())
    }
}
