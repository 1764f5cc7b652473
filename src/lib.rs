//! Character controllers driven by four state-machine designs: a flat FSM,
//! a hierarchical HSM, a concurrent CSM and a pushdown automaton.
//!
//! All logic is pure and frame-driven; terminal I/O lives in the binary.

pub mod autopilot;
pub mod config;
pub mod entities;
pub mod error;
pub mod history;
pub mod input;
pub mod input_macro;
pub mod logging;
pub mod machines;
pub mod physics;

pub use config::MachineConfig;
pub use entities::{InputSnapshot, Kinematics, MachineKind, Projectile};
pub use error::ConfigError;
pub use history::History;
pub use logging::init as init_logging;
pub use machines::{
    build, ConcurrentStateMachine, Controller, FlatState, FlatStateMachine,
    HierarchicalStateMachine, PdaState, PushdownAutomaton,
};
