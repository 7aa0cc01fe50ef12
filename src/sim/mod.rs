//! Deterministic frame simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame steps for kinematics
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod obstacles;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Aabb, check, first_hit, obstacle_bounds, player_bounds};
pub use difficulty::current_speed;
pub use obstacles::{AdvanceReport, ObstaclePool};
pub use player::JumpOutcome;
pub use state::{
    GameEvent, GameState, Obstacle, ObstaclePose, PlayerPose, PlayerState, RunPhase,
};
pub use tick::{TickInput, tick};
