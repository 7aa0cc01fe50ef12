//! Game state and core simulation types
//!
//! Everything a run mutates lives in `GameState`, owned by a single caller and
//! passed by reference into each component.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::obstacles::ObstaclePool;
use crate::consts::*;
use crate::tuning::Tuning;

/// Coarse phase of the run controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Before the first start, start overlay visible
    #[default]
    Idle,
    /// Simulation advancing
    Running,
    /// Collision detected, simulation frozen
    Ended,
}

/// The player's kinematic state
///
/// Invariant after every update: `vertical_position == 0` exactly when grounded,
/// and a grounded player has zero vertical velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Lateral offset, within `[-LANE_WIDTH, LANE_WIDTH]`
    pub lateral_position: f32,
    /// Height above the ground (>= 0)
    pub vertical_position: f32,
    pub vertical_velocity: f32,
    pub is_airborne: bool,
}

/// Render pose for the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub position: Vec3,
    /// Running sway around the forward axis (radians)
    pub tilt: f32,
}

/// Render pose for an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstaclePose {
    pub id: u32,
    pub position: Vec3,
}

/// An obstacle advancing toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Lane the obstacle spawned in
    pub lane: f32,
    /// Current lateral offset (starts at `lane`, drifts while oscillating)
    pub lateral_offset: f32,
    /// Distance along the corridor; increases toward the player
    pub longitudinal_position: f32,
    pub oscillates: bool,
    pub oscillation_speed: f32,
    /// +1.0 or -1.0
    pub oscillation_direction: f32,
    /// Index into the obstacle appearances
    pub visual_variant: u8,
}

impl Obstacle {
    /// Centre of the obstacle in world space
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            self.lateral_offset,
            OBSTACLE_CENTER_HEIGHT,
            self.longitudinal_position,
        )
    }

    pub fn pose(&self) -> ObstaclePose {
        ObstaclePose {
            id: self.id,
            position: self.center(),
        }
    }
}

/// Things that happened during a tick or a phase transition, drained by the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A run began; the pool was emptied of these obstacles
    RunStarted { cleared: Vec<u32> },
    /// A new obstacle entered the corridor
    ObstacleSpawned { id: u32, variant: u8, lane: f32 },
    /// An obstacle passed the player and was retired
    ObstaclePassed { id: u32 },
    /// Score changed this frame
    ScoreChanged { score: u64 },
    Jumped,
    Landed,
    /// The player hit an obstacle
    RunEnded { score: u64 },
}

/// Complete simulation state for a session of runs
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: RunPhase,
    pub score: u64,
    /// Obstacles retired in the current run
    pub obstacles_passed: u64,
    /// Current scroll speed (units/frame)
    pub scroll_speed: f32,
    pub player: PlayerState,
    pub obstacles: ObstaclePool,
    /// Milliseconds since the last spawn (or since the run started)
    pub spawn_timer_ms: f64,
    /// Milliseconds elapsed in the current run
    pub elapsed_ms: f64,
    /// Frames simulated in the current run
    pub frame: u64,
    /// Runs started this session
    pub runs: u32,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: RunPhase::Idle,
            score: 0,
            obstacles_passed: 0,
            scroll_speed: tuning.base_speed,
            player: PlayerState::default(),
            obstacles: ObstaclePool::new(seed),
            spawn_timer_ms: 0.0,
            elapsed_ms: 0.0,
            frame: 0,
            runs: 0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Begin a run from `Idle` or `Ended`.
    ///
    /// Returns false (and changes nothing) while a run is already in progress.
    pub fn start_run(&mut self) -> bool {
        if self.phase == RunPhase::Running {
            log::debug!("Start ignored: run already in progress");
            return false;
        }

        self.player = PlayerState::default();
        self.score = 0;
        self.obstacles_passed = 0;
        self.scroll_speed = self.tuning.base_speed;
        self.spawn_timer_ms = 0.0;
        self.elapsed_ms = 0.0;
        self.frame = 0;
        self.runs += 1;
        let cleared = self.obstacles.clear();
        self.phase = RunPhase::Running;
        self.events.push(GameEvent::RunStarted { cleared });

        log::info!("Run {} started (seed {})", self.runs, self.seed);
        true
    }

    /// Freeze the simulation after a collision
    pub(super) fn end_run(&mut self) {
        self.phase = RunPhase::Ended;
        self.events.push(GameEvent::RunEnded { score: self.score });
        log::info!("Run {} ended with score {}", self.runs, self.score);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Player pose for the current frame
    pub fn player_pose(&self, sway: bool) -> PlayerPose {
        let tilt = if sway {
            ((self.elapsed_ms * RUN_TILT_RATE).sin() as f32) * RUN_TILT_AMPLITUDE
        } else {
            0.0
        };
        PlayerPose {
            position: Vec3::new(
                self.player.lateral_position,
                self.player.vertical_position + PLAYER_RENDER_LIFT,
                0.0,
            ),
            tilt,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }
}
