use character_states::autopilot::Autopilot;
use character_states::*;

use character_states::PdaState::*;

fn make_pda() -> PushdownAutomaton {
    PushdownAutomaton::new(MachineConfig::default())
}

/// Tick with `input` until the top state is no longer `Jumping`.
fn land(pda: &mut PushdownAutomaton, input: &InputSnapshot) -> u32 {
    let mut ticks = 0;
    while pda.top() == Jumping {
        pda.tick(input);
        ticks += 1;
        assert!(ticks <= 100, "never landed");
    }
    ticks
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn starts_with_standing_sentinel() {
    let pda = make_pda();
    assert_eq!(pda.stack(), &[Standing]);
    assert_eq!(pda.top(), Standing);
    assert_eq!(pda.depth(), 1);
}

#[test]
fn standing_without_input_stays_put() {
    let mut pda = make_pda();
    for _ in 0..10 {
        pda.tick(&InputSnapshot::IDLE);
    }
    assert_eq!(pda.stack(), &[Standing]);
    assert_eq!(
        *pda.kinematics(),
        Kinematics {
            x: 100.0,
            y: 300.0,
            vertical_velocity: 0.0
        }
    );
}

// ── Walking ───────────────────────────────────────────────────────────────────

#[test]
fn walking_left_pushes_and_moves() {
    let mut pda = make_pda();
    pda.tick(&InputSnapshot::left());
    assert_eq!(pda.stack(), &[Standing, WalkingLeft]);
    assert_eq!(pda.kinematics().x, 100.0);

    pda.tick(&InputSnapshot::left());
    pda.tick(&InputSnapshot::left());
    assert_eq!(pda.kinematics().x, 92.0);
}

#[test]
fn left_wins_when_both_keys_held() {
    let mut pda = make_pda();
    let both = InputSnapshot {
        move_left: true,
        move_right: true,
        ..InputSnapshot::IDLE
    };
    pda.tick(&both);
    assert_eq!(pda.top(), WalkingLeft);
}

#[test]
fn releasing_key_pops_back_to_standing() {
    let mut pda = make_pda();
    pda.tick(&InputSnapshot::right());
    pda.tick(&InputSnapshot::right());
    pda.tick(&InputSnapshot::IDLE);
    // The release tick still moves once before popping.
    assert_eq!(pda.stack(), &[Standing]);
    assert_eq!(pda.kinematics().x, 108.0);
}

#[test]
fn walking_right_ignores_left_key() {
    let mut pda = make_pda();
    pda.tick(&InputSnapshot::right());
    pda.tick(&InputSnapshot::left());
    // Right released: moved right once and popped.
    assert_eq!(pda.kinematics().x, 104.0);
    assert_eq!(pda.top(), Standing);
}

// ── Jumping ───────────────────────────────────────────────────────────────────

#[test]
fn jump_from_standing_pushes_and_lands() {
    let mut pda = make_pda();
    pda.tick(&InputSnapshot::jump());
    assert_eq!(pda.stack(), &[Standing, Jumping]);
    assert_eq!(pda.kinematics().vertical_velocity, -12.0);

    pda.tick(&InputSnapshot::IDLE);
    assert_eq!(pda.kinematics().y, 288.5);

    let ticks = land(&mut pda, &InputSnapshot::IDLE);
    assert_eq!(ticks + 1, 47);
    assert_eq!(pda.stack(), &[Standing]);
    assert_eq!(pda.kinematics().y, 300.0);
    assert_eq!(pda.kinematics().vertical_velocity, 0.0);
}

#[test]
fn landing_resumes_walking_left() {
    let mut pda = make_pda();
    let left = InputSnapshot::left();
    pda.tick(&left);
    pda.tick(&left);
    pda.tick(&left.with_jump());
    assert_eq!(pda.stack(), &[Standing, WalkingLeft, Jumping]);
    let x_at_takeoff = pda.kinematics().x;

    // No horizontal movement while the jump is on top.
    land(&mut pda, &InputSnapshot::IDLE);
    assert_eq!(pda.top(), WalkingLeft);
    assert_eq!(pda.kinematics().x, x_at_takeoff);

    pda.tick(&left);
    assert_eq!(pda.kinematics().x, x_at_takeoff - 4.0);
    assert_eq!(pda.top(), WalkingLeft);
}

#[test]
fn resumed_walk_pops_on_first_tick_if_key_released() {
    let mut pda = make_pda();
    pda.tick(&InputSnapshot::left());
    pda.tick(&InputSnapshot::left().with_jump());
    land(&mut pda, &InputSnapshot::IDLE);

    pda.tick(&InputSnapshot::IDLE);
    assert_eq!(pda.stack(), &[Standing]);
}

#[test]
fn jump_held_while_airborne_does_not_stack() {
    let mut pda = make_pda();
    pda.tick(&InputSnapshot::jump());
    for _ in 0..10 {
        pda.tick(&InputSnapshot::jump());
    }
    assert_eq!(pda.stack(), &[Standing, Jumping]);
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn firing_pops_itself_after_one_tick() {
    let mut pda = make_pda();
    pda.tick(&InputSnapshot::fire());
    assert_eq!(pda.stack(), &[Standing, Firing]);
    let depth_before = pda.depth() - 1;

    pda.tick(&InputSnapshot::IDLE);
    assert_eq!(pda.depth(), depth_before);
    assert_eq!(pda.top(), Standing);
    assert_eq!(pda.shots_fired(), 1);
    assert_eq!(pda.projectiles().len(), 1);
}

#[test]
fn firing_while_walking_resumes_walk() {
    let mut pda = make_pda();
    let right = InputSnapshot::right();
    pda.tick(&right);
    pda.tick(&right.with_fire());
    assert_eq!(pda.stack(), &[Standing, WalkingRight, Firing]);
    assert_eq!(pda.kinematics().x, 104.0);

    // Firing tick: no movement.
    pda.tick(&right);
    assert_eq!(pda.top(), WalkingRight);
    assert_eq!(pda.kinematics().x, 104.0);

    pda.tick(&right);
    assert_eq!(pda.kinematics().x, 108.0);
}

#[test]
fn holding_fire_shoots_every_other_tick() {
    let mut pda = make_pda();
    for _ in 0..10 {
        pda.tick(&InputSnapshot::fire());
    }
    assert_eq!(pda.shots_fired(), 5);
    assert_eq!(pda.projectiles().len(), 5);
}

#[test]
fn projectiles_advance_every_tick() {
    let mut pda = make_pda();
    pda.tick(&InputSnapshot::fire());
    pda.tick(&InputSnapshot::IDLE);
    assert_eq!(pda.projectiles()[0].x, 155.0);
    pda.tick(&InputSnapshot::IDLE);
    assert_eq!(pda.projectiles()[0].x, 160.0);
}

// ── Multiple pushes in one tick ───────────────────────────────────────────────

#[test]
fn jump_and_fire_together_push_both() {
    let mut pda = make_pda();
    pda.tick(&InputSnapshot::jump().with_fire());
    assert_eq!(pda.stack(), &[Standing, Jumping, Firing]);

    // Fire resolves first, then the jump continues.
    pda.tick(&InputSnapshot::IDLE);
    assert_eq!(pda.stack(), &[Standing, Jumping]);
    assert_eq!(pda.shots_fired(), 1);
    assert_eq!(pda.kinematics().y, 300.0);

    pda.tick(&InputSnapshot::IDLE);
    assert_eq!(pda.kinematics().y, 288.5);
}

#[test]
fn walk_jump_and_fire_together_push_three() {
    let mut pda = make_pda();
    pda.tick(&InputSnapshot::left().with_jump().with_fire());
    assert_eq!(pda.stack(), &[Standing, WalkingLeft, Jumping, Firing]);

    pda.tick(&InputSnapshot::IDLE);
    land(&mut pda, &InputSnapshot::IDLE);
    assert_eq!(pda.top(), WalkingLeft);

    pda.tick(&InputSnapshot::IDLE);
    assert_eq!(pda.stack(), &[Standing]);
}

#[test]
fn release_and_jump_in_one_tick_pops_then_pushes() {
    let mut pda = make_pda();
    pda.tick(&InputSnapshot::left());
    pda.tick(&InputSnapshot::jump());
    assert_eq!(pda.stack(), &[Standing, Jumping]);
    land(&mut pda, &InputSnapshot::IDLE);
    assert_eq!(pda.stack(), &[Standing]);
}

// ── Invariants ────────────────────────────────────────────────────────────────

#[test]
fn sentinel_survives_random_input() {
    let mut pda = make_pda();
    for input in Autopilot::new(42).take(10_000) {
        pda.tick(&input);
        assert_eq!(pda.stack()[0], Standing);
        assert!(pda.kinematics().y <= 300.0);
        assert_eq!(
            pda.stack().iter().filter(|s| **s == Standing).count(),
            1,
            "Standing must only be the bottom frame"
        );
    }
}

#[test]
fn state_label_shows_the_stack() {
    let mut pda = make_pda();
    pda.tick(&InputSnapshot::left().with_jump());
    assert_eq!(pda.state_label(), "Standing > WalkingLeft > Jumping");
}
