//! Flappy Volley - a paddle-volley arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, bounces, scoring, modes)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Best endless-mode runs
//!
//! Rendering, audio, and input devices are the embedding application's
//! concern: it calls [`sim::tick()`] once per frame, feeds the pointer position
//! in through [`sim::TickInput`], and reads sprite positions and events back
//! out of [`sim::GameState`].

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::BestRuns;
pub use tuning::{EndlessEndPolicy, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Field dimensions (world units; the renderer scales to the viewport)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults - centers sit a fixed inset from each goal line
    pub const PADDLE_INSET_X: f32 = 40.0;
    pub const PADDLE_WIDTH: f32 = 22.0;
    pub const PADDLE_HEIGHT: f32 = 110.0;

    /// Bird defaults
    pub const BIRD_WIDTH: f32 = 34.0;
    pub const BIRD_HEIGHT: f32 = 24.0;
    /// Distance covered per tick along the (non-normalized) velocity vector
    pub const BIRD_SPEED: f32 = 10.0;

    /// Vertical-velocity band enforced after bounces and drops
    pub const MIN_VERTICAL_SPEED: f32 = 0.2;
    pub const MAX_VERTICAL_SPEED: f32 = 0.8;
    /// Bounce perturbation bias: scale factor is `1 + (r - BIAS)`, r in [0,1)
    pub const BOUNCE_SCALE_BIAS: f32 = 0.35;

    /// Horizontal nudge applied past the paddle edge after a bounce
    pub const PADDLE_NUDGE: f32 = 0.5;

    /// Launch point as fractions of the field size
    pub const DROP_X_FRACTION: f32 = 0.8;
    pub const DROP_Y_FRACTION: f32 = 0.5;

    /// Robot paddle tracking speed (units per tick)
    pub const ROBOT_MAX_SPEED: f32 = 6.0;
}

/// Display heading for a travel direction, in radians
#[inline]
pub fn heading(vel: Vec2) -> f32 {
    vel.y.atan2(vel.x)
}
