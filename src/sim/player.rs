//! Player kinematics: lateral steering and discrete-step jump physics

use super::state::PlayerState;
use super::tick::TickInput;
use crate::consts::LANE_WIDTH;
use crate::tuning::Tuning;

/// What the vertical state machine did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    None,
    /// A jump request was accepted
    Jumped,
    /// The player touched down
    Landed,
}

impl PlayerState {
    /// Advance one frame from the sampled input.
    ///
    /// Left is applied before right, so holding both nets (almost) zero movement
    /// and always resolves the same way.
    pub fn update(&mut self, input: &TickInput, tuning: &Tuning) -> JumpOutcome {
        if input.move_left {
            self.lateral_position = (self.lateral_position - tuning.lateral_step).max(-LANE_WIDTH);
        }
        if input.move_right {
            self.lateral_position = (self.lateral_position + tuning.lateral_step).min(LANE_WIDTH);
        }

        let mut outcome = JumpOutcome::None;
        if input.jump && self.try_jump(tuning.jump_impulse) {
            outcome = JumpOutcome::Jumped;
        }

        if self.is_airborne {
            self.vertical_velocity -= tuning.gravity;
            self.vertical_position += self.vertical_velocity;

            // Hard stop on the ground; no sub-frame contact point
            if self.vertical_position <= 0.0 {
                self.vertical_position = 0.0;
                self.vertical_velocity = 0.0;
                self.is_airborne = false;
                outcome = JumpOutcome::Landed;
            }
        }

        outcome
    }

    /// Accept a jump only from the ground
    pub fn try_jump(&mut self, impulse: f32) -> bool {
        if self.is_airborne {
            return false;
        }
        self.vertical_velocity = impulse;
        self.is_airborne = true;
        true
    }
}
