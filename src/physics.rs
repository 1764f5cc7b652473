/// Kinematic rules shared by every controller.
///
/// Each function mutates only what it is handed; the machines decide when
/// to call them.

use crate::config::MachineConfig;
use crate::entities::{InputSnapshot, Kinematics, Projectile};

/// Character at rest on the ground at the configured start position.
pub fn spawn(config: &MachineConfig) -> Kinematics {
    Kinematics {
        x: config.start_x,
        y: config.ground_level,
        vertical_velocity: 0.0,
    }
}

pub fn on_ground(k: &Kinematics, config: &MachineConfig) -> bool {
    k.y == config.ground_level
}

/// Give the character its upward jump velocity.
pub fn launch(k: &mut Kinematics, config: &MachineConfig) {
    k.vertical_velocity = config.jump_force;
}

/// Integrate one airborne tick.  Returns `true` if the character landed,
/// in which case `y` is clamped to the ground and the velocity zeroed.
pub fn fall(k: &mut Kinematics, config: &MachineConfig) -> bool {
    k.vertical_velocity += config.gravity;
    k.y += k.vertical_velocity;
    if k.y >= config.ground_level {
        k.y = config.ground_level;
        k.vertical_velocity = 0.0;
        true
    } else {
        false
    }
}

/// Horizontal movement for the held keys.  Both held cancel out.
pub fn walk(k: &mut Kinematics, input: &InputSnapshot, config: &MachineConfig) {
    if input.move_left {
        k.x -= config.speed;
    }
    if input.move_right {
        k.x += config.speed;
    }
}

/// A projectile leaving the character at the configured offset.
pub fn shoot(k: &Kinematics, config: &MachineConfig) -> Projectile {
    Projectile {
        x: k.x + config.projectile_offset,
        y: k.y,
        speed: config.projectile_speed,
    }
}

pub fn advance_projectiles(projectiles: &mut [Projectile]) {
    for p in projectiles {
        p.x += p.speed;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fall_lands_exactly_on_ground() {
        let config = MachineConfig::default();
        let mut k = spawn(&config);
        launch(&mut k, &config);

        let mut ticks = 0;
        while !fall(&mut k, &config) {
            ticks += 1;
            assert!(k.y < config.ground_level);
        }
        // Velocities -11.5 ..= 11.5 sum to zero after 47 ticks.
        assert_eq!(ticks + 1, 47);
        assert_eq!(k.y, 300.0);
        assert_eq!(k.vertical_velocity, 0.0);
    }

    #[test]
    fn walk_with_both_keys_stays_put() {
        let config = MachineConfig::default();
        let mut k = spawn(&config);
        let input = InputSnapshot {
            move_left: true,
            move_right: true,
            ..InputSnapshot::IDLE
        };
        walk(&mut k, &input, &config);
        assert_eq!(k.x, config.start_x);
    }
}
