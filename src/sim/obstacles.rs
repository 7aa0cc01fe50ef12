//! Obstacle pool: spawning, advancing, oscillation and retirement
//!
//! The pool owns its obstacles outright. Randomness comes from a seeded PCG
//! stream so a session replays identically from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Obstacle;
use crate::consts::*;
use crate::tuning::Tuning;

/// Result of advancing the pool by one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceReport {
    /// Obstacles that crossed the retirement plane this frame
    pub retired: Vec<u32>,
    /// Score credited for them
    pub reward: u64,
}

#[derive(Debug, Clone)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
    rng: Pcg32,
    next_id: u32,
}

impl ObstaclePool {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Create one obstacle at the spawn distance with randomized lane,
    /// appearance and oscillation
    pub fn spawn(&mut self, tuning: &Tuning) -> &Obstacle {
        let lane = LANES[self.rng.random_range(0..LANES.len())];
        let visual_variant = self.rng.random_range(0..OBSTACLE_VARIANTS);
        let oscillates = self.rng.random_bool(0.5);
        let oscillation_direction = if oscillates && self.rng.random_bool(0.5) {
            -1.0
        } else {
            1.0
        };

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.insert(Obstacle {
            id,
            lane,
            lateral_offset: lane,
            longitudinal_position: SPAWN_DISTANCE,
            oscillates,
            oscillation_speed: tuning.oscillation_speed,
            oscillation_direction,
            visual_variant,
        })
    }

    /// Add a fully specified obstacle
    pub fn insert(&mut self, obstacle: Obstacle) -> &Obstacle {
        self.next_id = self.next_id.max(obstacle.id.saturating_add(1));
        self.obstacles.push(obstacle);
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Move every obstacle toward the player and retire the ones that passed
    pub fn advance(&mut self, scroll_speed: f32, tuning: &Tuning) -> AdvanceReport {
        let mut report = AdvanceReport::default();

        for obstacle in &mut self.obstacles {
            obstacle.longitudinal_position += scroll_speed;

            if obstacle.oscillates {
                obstacle.lateral_offset +=
                    obstacle.oscillation_speed * obstacle.oscillation_direction;
                // Reflect once outside the corridor; the overshoot frame is kept
                if obstacle.lateral_offset.abs() > LANE_WIDTH {
                    obstacle.oscillation_direction = -obstacle.oscillation_direction;
                }
            }
        }

        self.obstacles.retain(|obstacle| {
            if obstacle.longitudinal_position > RETIRE_PLANE {
                report.retired.push(obstacle.id);
                false
            } else {
                true
            }
        });
        report.reward = report.retired.len() as u64 * tuning.obstacle_reward;

        report
    }

    /// Remove all obstacles, returning their ids
    pub fn clear(&mut self) -> Vec<u32> {
        self.obstacles.drain(..).map(|o| o.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
