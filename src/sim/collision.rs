//! Collision detection with axis-aligned bounding boxes
//!
//! Entities are approximated by fixed-size boxes around their simulated
//! position, not by their render meshes.

use glam::Vec3;

use super::state::{Obstacle, PlayerState};
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Inclusive overlap test: boxes that share a face intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

/// Player box: stands on the player's height, centred on its lateral position
pub fn player_bounds(player: &PlayerState) -> Aabb {
    let half = Vec3::from_array(PLAYER_HALF_EXTENTS);
    let center = Vec3::new(
        player.lateral_position,
        player.vertical_position + half.y,
        0.0,
    );
    Aabb::from_center(center, half)
}

pub fn obstacle_bounds(obstacle: &Obstacle) -> Aabb {
    Aabb::from_center(obstacle.center(), Vec3::from_array(OBSTACLE_HALF_EXTENTS))
}

/// Id of the first obstacle overlapping the player, if any
pub fn first_hit<'a>(
    player: &PlayerState,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
) -> Option<u32> {
    let player_box = player_bounds(player);
    obstacles
        .into_iter()
        .find(|obstacle| player_box.intersects(&obstacle_bounds(obstacle)))
        .map(|obstacle| obstacle.id)
}

/// True if the player overlaps any obstacle
pub fn check<'a>(player: &PlayerState, obstacles: impl IntoIterator<Item = &'a Obstacle>) -> bool {
    first_hit(player, obstacles).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(id: u32, x: f32, z: f32) -> Obstacle {
        Obstacle {
            id,
            lane: x,
            lateral_offset: x,
            longitudinal_position: z,
            oscillates: false,
            oscillation_speed: OSCILLATION_SPEED,
            oscillation_direction: 1.0,
            visual_variant: 0,
        }
    }

    #[test]
    fn test_same_lane_overlaps() {
        let player = PlayerState::default();
        let hit = obstacle(1, 0.0, 0.0);
        assert_eq!(hit.center(), Vec3::new(0.0, 1.5, 0.0));
        assert!(check(&player, [&hit]));
    }

    #[test]
    fn test_adjacent_lane_misses() {
        let player = PlayerState::default();
        assert!(!check(&player, [&obstacle(1, 3.0, 0.0)]));
        assert!(!check(&player, [&obstacle(1, -3.0, 0.0)]));
    }

    #[test]
    fn test_longitudinal_separation_misses() {
        let player = PlayerState::default();
        // Player spans z in [-0.5, 0.5], obstacle half depth 0.75
        assert!(!check(&player, [&obstacle(1, 0.0, -1.3)]));
        assert!(check(&player, [&obstacle(1, 0.0, -1.2)]));
        assert!(!check(&player, [&obstacle(1, 0.0, 1.3)]));
    }

    #[test]
    fn test_jumping_clears_obstacle() {
        let obstacle = obstacle(1, 0.0, 0.0);
        let low = PlayerState {
            vertical_position: 2.0,
            vertical_velocity: 0.1,
            is_airborne: true,
            ..Default::default()
        };
        assert!(check(&low, [&obstacle]));

        let high = PlayerState {
            vertical_position: 2.3,
            ..low
        };
        assert!(!check(&high, [&obstacle]));
    }

    #[test]
    fn test_touching_faces_collide() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_center(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE);
        let c = Aabb::from_center(Vec3::new(2.01, 0.0, 0.0), Vec3::ONE);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_first_hit_reports_first_overlap() {
        let player = PlayerState::default();
        let far = obstacle(1, 0.0, -40.0);
        let near = obstacle(2, 0.0, 0.2);
        let also_near = obstacle(3, 0.5, -0.2);
        assert_eq!(first_hit(&player, [&far, &near, &also_near]), Some(2));
        assert_eq!(first_hit(&player, [&far]), None);
        assert!(!check(&player, std::iter::empty::<&Obstacle>()));
    }
}
