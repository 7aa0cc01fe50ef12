//! Data-driven game balance
//!
//! Every number that affects how a run plays (not where things are) lives here,
//! so it can be overridden from a JSON document without a rebuild.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{self, PersistenceError, Storage};

/// Balance values consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lateral movement per frame while a direction is held
    pub lateral_step: f32,
    /// Upward velocity of an accepted jump
    pub jump_impulse: f32,
    /// Velocity lost per airborne frame
    pub gravity: f32,
    /// Scroll speed at score 0
    pub base_speed: f32,
    /// Scroll speed gained per score point
    pub speed_gain: f32,
    /// Scroll speed ceiling
    pub max_speed: f32,
    /// Milliseconds between obstacle spawns
    pub spawn_interval_ms: f64,
    /// Lateral speed of oscillating obstacles
    pub oscillation_speed: f32,
    /// Score credited per retired obstacle
    pub obstacle_reward: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lateral_step: LATERAL_STEP,
            jump_impulse: JUMP_IMPULSE,
            gravity: GRAVITY,
            base_speed: BASE_SPEED,
            speed_gain: SPEED_GAIN,
            max_speed: MAX_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            oscillation_speed: OSCILLATION_SPEED,
            obstacle_reward: OBSTACLE_REWARD,
        }
    }
}

impl Tuning {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "buhio_run_tuning";

    /// Check that every value keeps the simulation well-defined.
    ///
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("lateral_step", self.lateral_step),
            ("jump_impulse", self.jump_impulse),
            ("gravity", self.gravity),
            ("base_speed", self.base_speed),
            ("max_speed", self.max_speed),
            ("oscillation_speed", self.oscillation_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be finite and positive, got {value}"));
            }
        }
        if !self.speed_gain.is_finite() || self.speed_gain < 0.0 {
            return Err(format!(
                "speed_gain must be finite and non-negative, got {}",
                self.speed_gain
            ));
        }
        if self.max_speed < self.base_speed {
            return Err(format!(
                "max_speed ({}) is below base_speed ({})",
                self.max_speed, self.base_speed
            ));
        }
        if !self.spawn_interval_ms.is_finite() || self.spawn_interval_ms <= 0.0 {
            return Err(format!(
                "spawn_interval_ms must be finite and positive, got {}",
                self.spawn_interval_ms
            ));
        }
        Ok(())
    }

    /// Parse tuning from JSON, falling back to defaults when it is invalid
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        if let Err(reason) = tuning.validate() {
            log::warn!("Ignoring invalid tuning ({reason}), using defaults");
            return Ok(Self::default());
        }
        Ok(tuning)
    }

    /// Load tuning overrides from storage (defaults when absent or unreadable)
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json::<Tuning>(storage, Self::STORAGE_KEY) {
            Ok(Some(tuning)) => match tuning.validate() {
                Ok(()) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(reason) => {
                    log::warn!("Ignoring invalid tuning ({reason}), using defaults");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Failed to load tuning: {e}");
                Self::default()
            }
        }
    }
}
