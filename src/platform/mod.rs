//! Platform abstraction layer
//!
//! The simulation never touches the outside world directly. It talks to:
//! - a `Presenter` (poses, overlays, score text)
//! - an `AudioSink` (background music loop)
//! - an `InputSource` (held control signals)
//!
//! `headless` backs these with recorders and fixed signal sets for tests and the
//! native demo; `web` backs them with the DOM on wasm32.

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::{ObstaclePose, PlayerPose, TickInput};

/// Control signals sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    MoveLeft,
    MoveRight,
    Jump,
}

/// Read-only view of the held controls
pub trait InputSource {
    fn is_held(&self, signal: Signal) -> bool;

    /// Snapshot of all signals for one frame
    fn sample(&self) -> TickInput {
        TickInput {
            move_left: self.is_held(Signal::MoveLeft),
            move_right: self.is_held(Signal::MoveRight),
            jump: self.is_held(Signal::Jump),
        }
    }
}

/// Visual side of the game
pub trait Presenter {
    fn set_player_pose(&mut self, pose: PlayerPose);
    /// Create the visual for a newly spawned obstacle
    fn add_obstacle_visual(&mut self, id: u32, variant: u8, lane: f32);
    fn set_obstacle_pose(&mut self, pose: ObstaclePose);
    fn remove_obstacle_visual(&mut self, id: u32);
    fn show_start_overlay(&mut self, message: &str);
    fn hide_start_overlay(&mut self);
    fn show_game_over_overlay(&mut self);
    fn hide_game_over_overlay(&mut self);
    fn set_score_text(&mut self, score: u64);
    /// Frame-rate readout; `None` hides it
    fn set_fps_text(&mut self, fps: Option<u32>);
}

/// Background music loop
pub trait AudioSink {
    fn play_loop(&mut self);
    fn pause_loop(&mut self);
    /// Rewind to the start without changing play state
    fn reset_loop(&mut self);
    /// 0.0 - 1.0
    fn set_volume(&mut self, volume: f32);
}

/// Wall-clock time in Unix milliseconds, for timestamping records
#[cfg(not(target_arch = "wasm32"))]
pub fn unix_time_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
pub fn unix_time_ms() -> f64 {
    js_sys::Date::now()
}

/// A sampled snapshot is itself a (constant) input source
impl InputSource for TickInput {
    fn is_held(&self, signal: Signal) -> bool {
        match signal {
            Signal::MoveLeft => self.move_left,
            Signal::MoveRight => self.move_right,
            Signal::Jump => self.jump,
        }
    }

    fn sample(&self) -> TickInput {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_input_samples_itself() {
        let input = TickInput {
            move_left: true,
            move_right: false,
            jump: true,
        };
        assert!(input.is_held(Signal::MoveLeft));
        assert!(!input.is_held(Signal::MoveRight));
        assert_eq!(input.sample(), input);
    }
}
