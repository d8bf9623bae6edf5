//! Per-tick simulation step
//!
//! One call per rendered frame. Fixed order within a tick: banner countdown,
//! paddle movement, bird kinematics + bounces (vertical bound, robot paddle,
//! player paddle), then scoring and mode transitions. Transitions are guarded
//! by the current mode, never by side-effect flags, so a repeated evaluation
//! is idempotent.

use crate::consts::*;
use crate::tuning::EndlessEndPolicy;

use super::bounce::{paddle_bounce, update_orientation, vertical_bounce};
use super::state::{BannerKind, GameMode, GameState, SessionReport, Side};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer y in field space, when the pointer moved this frame
    pub pointer_y: Option<f32>,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Terminal runs and ended endless sessions are frozen
    if matches!(state.mode, GameMode::Terminal { .. }) || state.report.is_some() {
        return;
    }

    state.tick_count += 1;

    // Banner countdown - the single pending revert to the score display
    if let Some(banner) = &mut state.banner {
        banner.ticks_left = banner.ticks_left.saturating_sub(1);
        if banner.ticks_left == 0 {
            state.banner = None;
        }
    }

    // Paddles: the pointer drives the player, the robot tracks the bird
    // nearest its goal
    if let Some(y) = input.pointer_y {
        state.player.set_y(y);
    }
    if let Some(target_y) = robot_target(state) {
        state.robot.track_toward(target_y, ROBOT_MAX_SPEED);
    }

    // Kinematics and bounces. Index-based loop; spawning is deferred to the
    // mode step below, so the flock never grows mid-iteration.
    let hit_margin = state.tuning.hit_margin_fraction;
    for i in 0..state.birds.len() {
        state.birds[i].advance(BIRD_SPEED);
        if vertical_bounce(&mut state.birds[i], FIELD_HEIGHT, &mut state.rng) {
            state.events.wall_bounce = true;
        }
        if paddle_bounce(&mut state.birds[i], &state.robot, hit_margin) {
            state.events.paddle_hit = Some(Side::Robot);
        }
        if paddle_bounce(&mut state.birds[i], &state.player, hit_margin) {
            state.events.paddle_hit = Some(Side::Player);
        }
        update_orientation(&mut state.birds[i]);
    }

    match state.mode {
        GameMode::Playing => score_crossings(state),
        GameMode::Endless => run_endless(state),
        GameMode::Terminal { .. } => {}
    }
}

/// Robot tracking target: the y of the live bird closest to the robot goal
///
/// Birds already past the right edge are lost causes and are ignored.
fn robot_target(state: &GameState) -> Option<f32> {
    state
        .birds
        .iter()
        .filter(|b| b.pos.x <= FIELD_WIDTH)
        .max_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|b| b.pos.y)
}

/// Goal-line evaluation while Playing; only one crossing can occur per tick
fn score_crossings(state: &mut GameState) {
    let (crossed_right, crossed_left) = match state.birds.first() {
        Some(bird) => (bird.pos.x > FIELD_WIDTH, bird.pos.x < 0.0),
        None => return,
    };

    if crossed_right {
        state.score.player += 1;
        state.events.scored = Some(Side::Player);
        state.show_banner(BannerKind::PlayerScored);
        log::info!(
            "player scores ({} : {})",
            state.score.player,
            state.score.robot
        );
        if state.score.player >= state.tuning.win_threshold {
            enter_endless(state);
        } else {
            GameState::drop_bird(&mut state.rng, &mut state.birds[0]);
        }
    } else if crossed_left {
        state.score.robot += 1;
        state.events.scored = Some(Side::Robot);
        state.show_banner(BannerKind::RobotScored);
        log::info!(
            "robot scores ({} : {})",
            state.score.player,
            state.score.robot
        );
        if state.score.robot >= state.tuning.win_threshold {
            log::info!("robot reached the win threshold, run over");
            state.mode = GameMode::Terminal { winner: Side::Robot };
            state.birds.clear();
        } else {
            GameState::drop_bird(&mut state.rng, &mut state.birds[0]);
        }
    }
}

/// Player reached the win threshold: switch to periodic independent birds
fn enter_endless(state: &mut GameState) {
    log::info!("win threshold reached, entering endless mode");
    state.mode = GameMode::Endless;
    state.birds.clear();
    state.peak_live_birds = 0;
    state.spawner.arm(state.tick_count);
}

/// Endless mode: poll the spawner, end the session on left-edge exits
fn run_endless(state: &mut GameState) {
    if state.birds.iter().any(|b| b.pos.x < 0.0) {
        state.events.bird_escaped = true;
        match state.tuning.endless_end_policy {
            EndlessEndPolicy::FirstExit => {
                let live = state.birds.len() as u32;
                end_endless(state, live);
                return;
            }
            EndlessEndPolicy::Drain => {
                state.spawner.halt();
                state.birds.retain(|b| b.pos.x >= 0.0);
                if state.birds.is_empty() {
                    let peak = state.peak_live_birds;
                    end_endless(state, peak);
                    return;
                }
            }
        }
    }

    if state.spawner.should_spawn(state.tick_count) {
        state.spawn_bird();
        state.events.bird_spawned = true;
    }
}

fn end_endless(state: &mut GameState, live_birds: u32) {
    state.spawner.halt();
    state.report = Some(SessionReport {
        live_birds,
        at_tick: state.tick_count,
    });
    state.show_banner(BannerKind::EndlessOver);
    state.events.session_ended = true;
    log::info!(
        "endless session over: {} birds after {} ticks",
        live_birds,
        state.tick_count
    );
}
