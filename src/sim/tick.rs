//! Per-frame simulation tick
//!
//! One call per displayed frame. Order inside a frame is fixed: player,
//! obstacles and score, speed, spawning, collision. Collisions therefore always
//! see post-advance obstacle positions.

use super::collision;
use super::difficulty::current_speed;
use super::player::JumpOutcome;
use super::state::{GameEvent, GameState, RunPhase};

/// Control signals held during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

/// Advance the run by one frame.
///
/// `dt_ms` only drives the spawn timer and the run clock; kinematics use
/// fixed per-frame steps. Does nothing unless a run is in progress.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if state.phase != RunPhase::Running {
        return;
    }

    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
    state.frame += 1;
    state.elapsed_ms += dt_ms;

    match state.player.update(input, &state.tuning) {
        JumpOutcome::Jumped => state.events.push(GameEvent::Jumped),
        JumpOutcome::Landed => state.events.push(GameEvent::Landed),
        JumpOutcome::None => {}
    }

    let report = state.obstacles.advance(state.scroll_speed, &state.tuning);
    for id in &report.retired {
        state.events.push(GameEvent::ObstaclePassed { id: *id });
    }
    state.obstacles_passed += report.retired.len() as u64;
    if report.reward > 0 {
        state.score += report.reward;
        state.events.push(GameEvent::ScoreChanged { score: state.score });
    }

    state.scroll_speed = current_speed(state.score, &state.tuning);

    state.spawn_timer_ms += dt_ms;
    if state.spawn_timer_ms >= state.tuning.spawn_interval_ms {
        state.spawn_timer_ms = 0.0;
        let obstacle = state.obstacles.spawn(&state.tuning);
        let event = GameEvent::ObstacleSpawned {
            id: obstacle.id,
            variant: obstacle.visual_variant,
            lane: obstacle.lane,
        };
        log::trace!("Spawned {:?}", event);
        state.events.push(event);
    }

    if let Some(id) = collision::first_hit(&state.player, state.obstacles.iter()) {
        log::debug!("Player hit obstacle {} on frame {}", id, state.frame);
        state.end_run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Obstacle, PlayerState};
    use crate::tuning::Tuning;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        state.start_run();
        state.drain_events();
        state
    }

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

    #[test]
    fn test_idle_and_ended_do_not_advance() {
        let mut state = GameState::new(5, Tuning::default());
        tick(&mut state, &TickInput { jump: true, ..Default::default() }, 5000.0);
        assert_eq!(state.frame, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player, PlayerState::default());

        state.phase = RunPhase::Ended;
        tick(&mut state, &TickInput::default(), 5000.0);
        assert_eq!(state.frame, 0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_ten_quiet_frames() {
        let mut state = running_state(11);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.frame, 10);
        // 10 frames is well under the spawn interval
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = running_state(3);
        tick(&mut state, &TickInput::default(), 1499.0);
        assert!(state.obstacles.is_empty());

        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.obstacles.len(), 1);
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::ObstacleSpawned { .. }]
        ));
        assert_eq!(state.spawn_timer_ms, 0.0);

        tick(&mut state, &TickInput::default(), 1000.0);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_retirement_scores_and_raises_speed() {
        let mut state = running_state(3);
        state.obstacles.insert(obstacle_at(100, 3.0, RETIRE_PLANE - 0.1));

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.score, OBSTACLE_REWARD);
        assert_eq!(state.obstacles_passed, 1);
        assert!(state.obstacles.is_empty());
        assert!(state.scroll_speed > BASE_SPEED);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::ObstaclePassed { id: 100 },
                GameEvent::ScoreChanged { score: 10 },
            ]
        );

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.score, OBSTACLE_REWARD);
    }

    #[test]
    fn test_collision_ends_run_on_detection_frame() {
        let mut state = running_state(3);
        // Front face reaches the player's back face after two frames at base speed
        state.obstacles.insert(obstacle_at(7, 0.0, -1.25 - 0.5));

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.phase, RunPhase::Running);

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.phase, RunPhase::Ended);
        assert_eq!(state.frame, 2);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::RunEnded { score: 0 })
        );

        // Frozen afterwards
        let frozen = state.obstacles.iter().next().unwrap().longitudinal_position;
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.frame, 2);
        assert_eq!(
            state.obstacles.iter().next().unwrap().longitudinal_position,
            frozen
        );

        // Restart
        assert!(state.start_run());
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, RunPhase::Running);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_jump_over_obstacle() {
        let mut state = running_state(3);
        state.obstacles.insert(obstacle_at(9, 0.0, -4.0));

        tick(&mut state, &TickInput { jump: true, ..Default::default() }, FRAME_MS);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);

        let mut passed = false;
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
            assert_eq!(state.phase, RunPhase::Running);
            if state.drain_events().contains(&GameEvent::ObstaclePassed { id: 9 }) {
                passed = true;
                break;
            }
        }
        assert!(passed);
        assert_eq!(state.score, OBSTACLE_REWARD);
    }

    #[test]
    fn test_determinism() {
        let mut a = running_state(99999);
        let mut b = running_state(99999);
        let inputs = [
            TickInput { move_left: true, ..Default::default() },
            TickInput { jump: true, ..Default::default() },
            TickInput { move_right: true, ..Default::default() },
            TickInput::default(),
        ];

        for frame in 0..600 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut a, input, FRAME_MS);
            tick(&mut b, input, FRAME_MS);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player, b.player);
        assert!(a.obstacles.iter().eq(b.obstacles.iter()));
    }
}
