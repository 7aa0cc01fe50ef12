//! Buhio Run - a three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic frame simulation (kinematics, obstacles, difficulty, collisions)
//! - `game`: Run controller glue that turns simulation events into presentation/audio calls
//! - `platform`: Collaborator seams (presenter, audio, input) with headless and browser backends
//! - `persistence`: Key/value storage for settings and high scores
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

/// Corridor geometry and default balance values
pub mod consts {
    /// Lateral distance between adjacent lanes; also the lateral clamp for the player
    pub const LANE_WIDTH: f32 = 3.0;
    /// Lateral offsets of the three lanes
    pub const LANES: [f32; 3] = [-LANE_WIDTH, 0.0, LANE_WIDTH];

    /// Player lateral movement per frame while a direction is held
    pub const LATERAL_STEP: f32 = 0.15;
    /// Upward velocity applied when a jump is accepted (units/frame)
    pub const JUMP_IMPULSE: f32 = 0.4;
    /// Velocity lost per airborne frame
    pub const GRAVITY: f32 = 0.02;

    /// Scroll speed at score 0 (units/frame)
    pub const BASE_SPEED: f32 = 0.3;
    /// Scroll speed gained per score point
    pub const SPEED_GAIN: f32 = 0.0001;
    /// Scroll speed ceiling
    pub const MAX_SPEED: f32 = 0.8;

    /// Longitudinal position new obstacles appear at
    pub const SPAWN_DISTANCE: f32 = -80.0;
    /// Obstacles past this longitudinal position are retired and credit score
    pub const RETIRE_PLANE: f32 = 5.0;
    /// Score credited per retired obstacle
    pub const OBSTACLE_REWARD: u64 = 10;
    /// Milliseconds between obstacle spawns
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Lateral speed of oscillating obstacles (units/frame)
    pub const OSCILLATION_SPEED: f32 = 0.05;
    /// Number of obstacle appearances
    pub const OBSTACLE_VARIANTS: u8 = 3;

    /// Player box half extents (x, y, z); the box stands on the player's height
    pub const PLAYER_HALF_EXTENTS: [f32; 3] = [0.75, 1.25, 0.5];
    /// Obstacle cube half extents
    pub const OBSTACLE_HALF_EXTENTS: [f32; 3] = [0.75, 0.75, 0.75];
    /// Height of an obstacle's centre above the ground
    pub const OBSTACLE_CENTER_HEIGHT: f32 = 1.5;

    /// Height the player model is drawn above its simulated vertical position
    pub const PLAYER_RENDER_LIFT: f32 = 1.0;
    /// Running sway amplitude (radians)
    pub const RUN_TILT_AMPLITUDE: f32 = 0.1;
    /// Running sway frequency (radians per millisecond)
    pub const RUN_TILT_RATE: f64 = 0.01;

    /// Nominal frame length used by fixed-step hosts
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
