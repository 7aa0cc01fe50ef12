//! Demo-mode bot
//!
//! Produces the input a simple player would hold this frame: jump over the
//! nearest obstacle in the player's path, otherwise drift back to the centre lane.

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// Jump when contact is at most this many frames away (rise time to clear an
/// obstacle is ~8 frames at default tuning)
const JUMP_LEAD_FRAMES: f32 = 10.0;
/// Extra lateral clearance treated as "in the path"
const PATH_MARGIN: f32 = 0.25;

/// Frames until the nearest obstacle in the player's path touches the player
pub fn frames_to_contact(state: &GameState) -> Option<f32> {
    let player = &state.player;
    let speed = state.scroll_speed.max(f32::EPSILON);
    let reach = PLAYER_HALF_EXTENTS[0] + OBSTACLE_HALF_EXTENTS[0] + PATH_MARGIN;
    let contact_z = -(PLAYER_HALF_EXTENTS[2] + OBSTACLE_HALF_EXTENTS[2]);

    state
        .obstacles
        .iter()
        .filter(|o| (o.lateral_offset - player.lateral_position).abs() <= reach)
        .map(|o| (contact_z - o.longitudinal_position) / speed)
        .filter(|frames| *frames >= 0.0)
        .min_by(|a, b| a.total_cmp(b))
}

/// Input for the current frame
pub fn steer(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    if !state.is_running() {
        return input;
    }

    if frames_to_contact(state).is_some_and(|frames| frames <= JUMP_LEAD_FRAMES) {
        input.jump = true;
        return input;
    }

    let x = state.player.lateral_position;
    let step = state.tuning.lateral_step;
    if x > step {
        input.move_left = true;
    } else if x < -step {
        input.move_right = true;
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, RunPhase};
    use crate::sim::tick;
    use crate::tuning::Tuning;

    fn obstacle_at(id: u32, lateral: f32, longitudinal: f32) -> Obstacle {
        Obstacle {
            id,
            lane: lateral,
            lateral_offset: lateral,
            longitudinal_position: longitudinal,
            oscillates: false,
            oscillation_speed: OSCILLATION_SPEED,
            oscillation_direction: 1.0,
            visual_variant: 0,
        }
    }

    fn running_state() -> GameState {
        let mut state = GameState::new(8, Tuning::default());
        state.start_run();
        state
    }

    #[test]
    fn test_idle_state_holds_nothing() {
        let state = GameState::new(8, Tuning::default());
        assert_eq!(steer(&state), TickInput::default());
    }

    #[test]
    fn test_jumps_for_close_obstacle_only() {
        let mut state = running_state();
        state.obstacles.insert(obstacle_at(1, 0.0, -20.0));
        assert!(!steer(&state).jump);

        let mut state = running_state();
        state.obstacles.insert(obstacle_at(1, 0.0, -4.0));
        assert!(steer(&state).jump);

        // Other lane is not a threat
        let mut state = running_state();
        state.obstacles.insert(obstacle_at(1, 3.0, -4.0));
        assert!(!steer(&state).jump);
    }

    #[test]
    fn test_drifts_to_centre() {
        let mut state = running_state();
        state.player.lateral_position = 2.0;
        assert!(steer(&state).move_left);
        state.player.lateral_position = -2.0;
        assert!(steer(&state).move_right);
        state.player.lateral_position = 0.05;
        assert_eq!(steer(&state), TickInput::default());
    }

    #[test]
    fn test_clears_obstacle_in_lane() {
        let mut state = running_state();
        state.obstacles.insert(obstacle_at(1, 0.0, -20.0));

        for _ in 0..100 {
            let input = steer(&state);
            tick::tick(&mut state, &input, FRAME_MS);
        }
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, OBSTACLE_REWARD);
    }
}
