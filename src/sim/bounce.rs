//! Bounce detection and response
//!
//! The heart of the volley feel: vertical bounces flip and randomly perturb
//! the bird's vertical velocity inside a fixed band, paddle bounces flip the
//! horizontal velocity and snap the bird clear of the paddle so a single
//! crossing produces a single bounce.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::heading;

use super::bounds::PaddleEdges;
use super::state::{Bird, Paddle, Side};

/// Push a near-horizontal velocity away from zero, preserving its sign
///
/// Shared by the bounce engine and the drop policy so every trajectory has a
/// perceptible vertical component. A velocity of exactly zero has no sign to
/// preserve; it is floored upward and reported.
pub(crate) fn push_off_horizontal(vel: &mut Vec2, rng: &mut Pcg32) {
    if vel.y == 0.0 {
        log::warn!("degenerate vertical velocity, flooring upward");
        vel.y = MIN_VERTICAL_SPEED;
        return;
    }
    if vel.y.abs() < MIN_VERTICAL_SPEED {
        vel.y = vel.y.signum() * (MIN_VERTICAL_SPEED + rng.random::<f32>() / 4.0);
    }
}

/// Clamp a post-bounce vertical velocity into the legal band
///
/// Overshoots are pulled back toward zero by a uniform draw, bounded so the
/// result keeps its sign and stays inside [MIN, MAX].
fn clamp_vertical(vel: &mut Vec2, rng: &mut Pcg32) {
    if vel.y.abs() > MAX_VERTICAL_SPEED {
        let pulled = (vel.y.abs() - rng.random::<f32>())
            .clamp(MIN_VERTICAL_SPEED, MAX_VERTICAL_SPEED);
        vel.y = vel.y.signum() * pulled;
    }
    push_off_horizontal(vel, rng);
}

/// Bounce off the top or bottom field bound
///
/// Triggers when the bird's y exits `[0, field_height]`. Flips the vertical
/// velocity scaled by `1 + (r - 0.35)` (mean 1.15, so rallies trend lively),
/// clamps it into the band, and pulls the position back onto the bound so the
/// crossing cannot fire again next tick.
pub fn vertical_bounce(bird: &mut Bird, field_height: f32, rng: &mut Pcg32) -> bool {
    if (0.0..=field_height).contains(&bird.pos.y) {
        return false;
    }
    let scale = 1.0 + (rng.random::<f32>() - BOUNCE_SCALE_BIAS);
    bird.vel.y = -bird.vel.y * scale;
    clamp_vertical(&mut bird.vel, rng);
    bird.pos.y = bird.pos.y.clamp(0.0, field_height);
    true
}

/// Bounce off a paddle
///
/// Triggers when the bird's y lies strictly between the paddle's top and
/// bottom edges, its leading edge (a configurable fraction of its half-width)
/// has crossed the paddle's inward-facing edge, and it is moving toward the
/// paddle. Flips the horizontal velocity, then snaps the leading edge onto
/// the paddle edge plus a fixed nudge away - the single-bounce-per-crossing
/// guard.
pub fn paddle_bounce(bird: &mut Bird, paddle: &Paddle, hit_margin_fraction: f32) -> bool {
    let edges = PaddleEdges::of(paddle);
    if !edges.spans_y(bird.pos.y) {
        return false;
    }
    let lead = hit_margin_fraction * bird.size.x / 2.0;
    let crossed = match paddle.side {
        Side::Player => bird.vel.x < 0.0 && bird.pos.x - lead <= edges.inner,
        Side::Robot => bird.vel.x > 0.0 && bird.pos.x + lead >= edges.inner,
    };
    if !crossed {
        return false;
    }
    bird.vel.x = -bird.vel.x;
    bird.pos.x = match paddle.side {
        Side::Player => edges.inner + lead + PADDLE_NUDGE,
        Side::Robot => edges.inner - lead - PADDLE_NUDGE,
    };
    true
}

/// Point the sprite along its travel direction
///
/// Pure derived display value; the facing flip after a paddle bounce falls
/// out of the recomputation because `vel.x` changed sign.
pub fn update_orientation(bird: &mut Bird) {
    bird.orientation = heading(bird.vel);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn bird_at(x: f32, y: f32, vel: Vec2) -> Bird {
        Bird {
            id: 1,
            pos: Vec2::new(x, y),
            size: Vec2::new(BIRD_WIDTH, BIRD_HEIGHT),
            vel,
            orientation: 0.0,
        }
    }

    fn paddle(side: Side, x: f32, y: f32) -> Paddle {
        let mut p = Paddle::new(side);
        p.pos = Vec2::new(x, y);
        p
    }

    #[test]
    fn test_no_bounce_inside_bounds() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut bird = bird_at(400.0, 300.0, Vec2::new(-1.0, 0.5));
        assert!(!vertical_bounce(&mut bird, FIELD_HEIGHT, &mut rng));
        assert_eq!(bird.vel.y, 0.5);
    }

    #[test]
    fn test_top_bounce_turns_bird_downfield() {
        // A bird 5 units past the top moving up must come back down in band
        for seed in 0..100 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut bird = bird_at(400.0, -5.0, Vec2::new(-1.0, -0.5));
            assert!(vertical_bounce(&mut bird, FIELD_HEIGHT, &mut rng));
            assert!(bird.vel.y > 0.0, "seed {seed}: must head back into field");
            assert!(bird.vel.y >= MIN_VERTICAL_SPEED);
            assert!(bird.vel.y <= MAX_VERTICAL_SPEED);
            assert_eq!(bird.pos.y, 0.0, "position pulled back onto the bound");
        }
    }

    #[test]
    fn test_bottom_bounce_flips_upward() {
        for seed in 0..100 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut bird = bird_at(400.0, FIELD_HEIGHT + 3.0, Vec2::new(1.0, 0.4));
            assert!(vertical_bounce(&mut bird, FIELD_HEIGHT, &mut rng));
            assert!(bird.vel.y < 0.0, "seed {seed}");
            assert!(bird.vel.y.abs() <= MAX_VERTICAL_SPEED);
            assert_eq!(bird.pos.y, FIELD_HEIGHT);
        }
    }

    #[test]
    fn test_degenerate_vertical_velocity_floors_upward() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut vel = Vec2::new(-1.0, 0.0);
        push_off_horizontal(&mut vel, &mut rng);
        assert_eq!(vel.y, MIN_VERTICAL_SPEED);
    }

    #[test]
    fn test_push_off_horizontal_preserves_sign() {
        let mut rng = Pcg32::seed_from_u64(5);
        for y in [-0.1, -0.01, 0.05, 0.19] {
            let mut vel = Vec2::new(-1.0, y);
            push_off_horizontal(&mut vel, &mut rng);
            assert_eq!(vel.y.signum(), y.signum());
            assert!(vel.y.abs() >= MIN_VERTICAL_SPEED);
        }
    }

    #[test]
    fn test_player_paddle_bounce_flips_and_snaps() {
        let mut bird = bird_at(55.0, 300.0, Vec2::new(-1.0, 0.3));
        let paddle = paddle(Side::Player, 40.0, 300.0);
        assert!(paddle_bounce(&mut bird, &paddle, 0.75));
        assert_eq!(bird.vel.x, 1.0);
        // Leading edge sits exactly one nudge past the paddle edge
        let lead = 0.75 * BIRD_WIDTH / 2.0;
        assert_eq!(bird.pos.x, 51.0 + lead + PADDLE_NUDGE);
    }

    #[test]
    fn test_paddle_bounce_does_not_refire_next_tick() {
        let mut bird = bird_at(55.0, 300.0, Vec2::new(-1.0, 0.3));
        let paddle = paddle(Side::Player, 40.0, 300.0);
        assert!(paddle_bounce(&mut bird, &paddle, 0.75));
        // Still inside the trigger region, but now moving away
        assert!(!paddle_bounce(&mut bird, &paddle, 0.75));
        assert_eq!(bird.vel.x, 1.0);
    }

    #[test]
    fn test_paddle_miss_outside_vertical_span() {
        let mut bird = bird_at(55.0, 100.0, Vec2::new(-1.0, 0.3));
        let paddle = paddle(Side::Player, 40.0, 300.0);
        assert!(!paddle_bounce(&mut bird, &paddle, 0.75));
        assert_eq!(bird.vel.x, -1.0);
    }

    #[test]
    fn test_robot_paddle_bounce_mirrors_player() {
        let mut bird = bird_at(745.0, 300.0, Vec2::new(1.0, -0.3));
        let paddle = paddle(Side::Robot, 760.0, 300.0);
        assert!(paddle_bounce(&mut bird, &paddle, 0.75));
        assert_eq!(bird.vel.x, -1.0);
        let lead = 0.75 * BIRD_WIDTH / 2.0;
        assert_eq!(bird.pos.x, 749.0 - lead - PADDLE_NUDGE);
    }

    #[test]
    fn test_bird_moving_away_is_ignored() {
        let mut bird = bird_at(55.0, 300.0, Vec2::new(1.0, 0.3));
        let paddle = paddle(Side::Player, 40.0, 300.0);
        assert!(!paddle_bounce(&mut bird, &paddle, 0.75));
    }

    #[test]
    fn test_orientation_tracks_velocity() {
        let mut bird = bird_at(400.0, 300.0, Vec2::new(1.0, 0.0));
        update_orientation(&mut bird);
        assert!(bird.orientation.abs() < 1e-6);
        bird.vel.x = -1.0;
        update_orientation(&mut bird);
        assert!((bird.orientation.abs() - std::f32::consts::PI).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_post_bounce_vertical_speed_stays_in_band(
            vy in -2.0f32..2.0,
            depth in 0.1f32..8.0,
            seed in any::<u64>(),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut bird = bird_at(400.0, -depth, Vec2::new(-1.0, vy));
            prop_assert!(vertical_bounce(&mut bird, FIELD_HEIGHT, &mut rng));
            prop_assert!(bird.vel.y.abs() >= MIN_VERTICAL_SPEED);
            prop_assert!(bird.vel.y.abs() <= MAX_VERTICAL_SPEED);
        }
    }
}
