//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per rendered frame, driven by the caller
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod bounce;
pub mod bounds;
pub mod state;
pub mod tick;

pub use bounce::{paddle_bounce, update_orientation, vertical_bounce};
pub use bounds::PaddleEdges;
pub use state::{
    Banner, BannerKind, Bird, GameEvents, GameMode, GameState, IntervalSpawner, Paddle, Score,
    SessionReport, Side,
};
pub use tick::{TickInput, tick};
