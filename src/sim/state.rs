//! Game state and core simulation types
//!
//! Everything needed to resume a session deterministically lives here and
//! serializes as one JSON document, RNG included.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::heading;
use crate::tuning::Tuning;

use super::bounce::push_off_horizontal;

/// Which side of the field an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, driven by the pointer
    Player,
    /// Right paddle, driven by the tracking AI
    Robot,
}

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Normal volley play with scoring
    Playing,
    /// Post-win bonus mode: periodic independent birds, no scoring
    Endless,
    /// Run ended; no further state changes
    Terminal { winner: Side },
}

/// A paddle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Center position; only y changes after construction
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    pub(crate) fn new(side: Side) -> Self {
        let x = match side {
            Side::Player => PADDLE_INSET_X,
            Side::Robot => FIELD_WIDTH - PADDLE_INSET_X,
        };
        Self {
            side,
            pos: Vec2::new(x, FIELD_HEIGHT / 2.0),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }

    /// Move the center toward a target y, clamped to a per-tick speed and to
    /// the field
    pub fn track_toward(&mut self, target_y: f32, max_step: f32) {
        let delta = (target_y - self.pos.y).clamp(-max_step, max_step);
        self.pos.y = clamp_paddle_y(self.pos.y + delta, self.size.y);
    }

    /// Set the center directly (pointer input), clamped to the field
    pub fn set_y(&mut self, y: f32) {
        self.pos.y = clamp_paddle_y(y, self.size.y);
    }
}

fn clamp_paddle_y(y: f32, height: f32) -> f32 {
    y.clamp(height / 2.0, FIELD_HEIGHT - height / 2.0)
}

/// The bird entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    /// Direction-carrying velocity; not normalized (x is ±1 after a drop,
    /// y stays in the clamped vertical band)
    pub vel: Vec2,
    /// Display heading in radians, derived from `vel`
    pub orientation: f32,
}

impl Bird {
    fn new(id: u32) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            size: Vec2::new(BIRD_WIDTH, BIRD_HEIGHT),
            vel: Vec2::ZERO,
            orientation: 0.0,
        }
    }

    /// Advance one tick along the velocity vector
    pub fn advance(&mut self, speed: f32) {
        self.pos += self.vel * speed;
    }
}

/// Monotonic score counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub robot: u32,
}

/// Transient message shown instead of the score line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerKind {
    PlayerScored,
    RobotScored,
    EndlessOver,
}

/// At most one banner is pending; a new one replaces (cancels) the old
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub ticks_left: u32,
}

/// Scheduler for endless-mode spawning
///
/// The tick loop polls `should_spawn` once per tick; there is no timer racing
/// the frame loop, and cancellation is internal via `halt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalSpawner {
    pub interval_ticks: u64,
    next_due: u64,
    halted: bool,
}

impl IntervalSpawner {
    fn new(interval_ticks: u64) -> Self {
        Self {
            interval_ticks,
            next_due: 0,
            halted: true,
        }
    }

    /// Start spawning, first spawn one interval from `now`
    pub fn arm(&mut self, now: u64) {
        self.next_due = now + self.interval_ticks;
        self.halted = false;
    }

    /// Stop spawning; idempotent
    pub fn halt(&mut self) {
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Whether a spawn is due at `now`; advances the schedule when it is
    pub fn should_spawn(&mut self, now: u64) -> bool {
        if self.halted || now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval_ticks;
        true
    }
}

/// Outcome of an endless session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Live-bird count - the achievement metric
    pub live_birds: u32,
    /// Tick at which the session ended
    pub at_tick: u64,
}

/// Per-tick outputs for the embedding layer (sprite add/remove, sounds, text)
///
/// Cleared at the start of every tick; never serialized.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameEvents {
    pub wall_bounce: bool,
    pub paddle_hit: Option<Side>,
    pub scored: Option<Side>,
    pub bird_spawned: bool,
    pub bird_escaped: bool,
    pub session_ended: bool,
}

impl GameEvents {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Live RNG, serialized so a restored session replays identically
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub tick_count: u64,
    pub mode: GameMode,
    pub score: Score,
    pub player: Paddle,
    pub robot: Paddle,
    /// Live birds: exactly one while Playing, zero or more in Endless
    pub birds: Vec<Bird>,
    pub banner: Option<Banner>,
    pub spawner: IntervalSpawner,
    /// Set once when an endless session ends
    pub report: Option<SessionReport>,
    /// Highest simultaneous bird count seen in Endless
    pub peak_live_birds: u32,
    /// Per-tick event flags for the embedding layer
    #[serde(skip)]
    pub events: GameEvents,
    next_id: u32,
}

impl GameState {
    /// Create a fully-initialized session: both paddles placed, the first
    /// bird dropped at the launch point
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawner: IntervalSpawner::new(tuning.spawn_interval_ticks),
            tuning,
            tick_count: 0,
            mode: GameMode::Playing,
            score: Score::default(),
            player: Paddle::new(Side::Player),
            robot: Paddle::new(Side::Robot),
            birds: Vec::new(),
            banner: None,
            report: None,
            peak_live_birds: 0,
            events: GameEvents::default(),
            next_id: 1,
        };
        state.spawn_bird();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The fixed launch point birds are dropped at
    pub fn launch_point() -> Vec2 {
        Vec2::new(
            FIELD_WIDTH * DROP_X_FRACTION,
            FIELD_HEIGHT * DROP_Y_FRACTION,
        )
    }

    /// Drop policy: reposition to the launch point and assign a fresh
    /// randomized velocity heading toward the player side
    ///
    /// Shared between initial setup, post-score resets, and endless spawns.
    pub fn drop_bird(rng: &mut Pcg32, bird: &mut Bird) {
        bird.pos = Self::launch_point();
        bird.vel = Vec2::new(-1.0, rng.random::<f32>() - 0.4);
        push_off_horizontal(&mut bird.vel, rng);
        bird.orientation = heading(bird.vel);
    }

    /// Spawn a new bird via the drop policy and append it to the flock
    pub fn spawn_bird(&mut self) {
        let id = self.next_entity_id();
        let mut bird = Bird::new(id);
        Self::drop_bird(&mut self.rng, &mut bird);
        self.birds.push(bird);
        self.peak_live_birds = self.peak_live_birds.max(self.birds.len() as u32);
    }

    /// Replace any pending banner; at most one revert is ever outstanding
    pub fn show_banner(&mut self, kind: BannerKind) {
        self.banner = Some(Banner {
            kind,
            ticks_left: self.tuning.banner_ticks,
        });
    }

    /// Text for the score display element
    pub fn display_line(&self) -> String {
        if let Some(banner) = &self.banner {
            return match banner.kind {
                BannerKind::PlayerScored => "you scored!".to_string(),
                BannerKind::RobotScored => "robot scored!".to_string(),
                BannerKind::EndlessOver => match &self.report {
                    Some(r) => format!("game over - {} birds", r.live_birds),
                    None => "game over".to_string(),
                },
            };
        }
        match self.mode {
            GameMode::Terminal { winner: Side::Robot } => "robot wins".to_string(),
            GameMode::Terminal { winner: Side::Player } => "you win".to_string(),
            GameMode::Endless => match &self.report {
                Some(r) => format!("game over - {} birds", r.live_birds),
                None => format!("{} birds aloft", self.birds.len()),
            },
            GameMode::Playing => format!("{} : {}", self.score.player, self.score.robot),
        }
    }
}
