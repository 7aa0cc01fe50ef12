//! Collaborators for hosts without a display
//!
//! `RecordingPresenter` keeps every command it receives so tests can assert on
//! them and the native demo can report what would have been drawn.

use std::collections::{BTreeMap, HashSet};

use super::{AudioSink, InputSource, Presenter, Signal};
use crate::sim::{ObstaclePose, PlayerPose};

/// A presentation command as issued by the run controller
#[derive(Debug, Clone, PartialEq)]
pub enum PresentCommand {
    PlayerPose(PlayerPose),
    AddObstacle { id: u32, variant: u8, lane: f32 },
    ObstaclePose(ObstaclePose),
    RemoveObstacle(u32),
    ShowStart(String),
    HideStart,
    ShowGameOver,
    HideGameOver,
    Score(u64),
    Fps(Option<u32>),
}

/// Records commands and tracks the resulting scene
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub commands: Vec<PresentCommand>,
    /// Obstacle visuals currently alive, by id
    pub visuals: BTreeMap<u32, Option<ObstaclePose>>,
    pub start_overlay: Option<String>,
    pub game_over_visible: bool,
    pub score_text: Option<u64>,
    pub fps_text: Option<u32>,
    pub player: Option<PlayerPose>,
}

impl RecordingPresenter {
    /// Drop recorded commands, keeping the scene
    pub fn take_commands(&mut self) -> Vec<PresentCommand> {
        std::mem::take(&mut self.commands)
    }

    fn record(&mut self, command: PresentCommand) {
        log::trace!("present: {:?}", command);
        self.commands.push(command);
    }
}

impl Presenter for RecordingPresenter {
    fn set_player_pose(&mut self, pose: PlayerPose) {
        self.player = Some(pose);
        self.record(PresentCommand::PlayerPose(pose));
    }

    fn add_obstacle_visual(&mut self, id: u32, variant: u8, lane: f32) {
        self.visuals.insert(id, None);
        self.record(PresentCommand::AddObstacle { id, variant, lane });
    }

    fn set_obstacle_pose(&mut self, pose: ObstaclePose) {
        match self.visuals.get_mut(&pose.id) {
            Some(slot) => *slot = Some(pose),
            None => log::warn!("Pose for unknown obstacle {}", pose.id),
        }
        self.record(PresentCommand::ObstaclePose(pose));
    }

    fn remove_obstacle_visual(&mut self, id: u32) {
        self.visuals.remove(&id);
        self.record(PresentCommand::RemoveObstacle(id));
    }

    fn show_start_overlay(&mut self, message: &str) {
        self.start_overlay = Some(message.to_string());
        self.record(PresentCommand::ShowStart(message.to_string()));
    }

    fn hide_start_overlay(&mut self) {
        self.start_overlay = None;
        self.record(PresentCommand::HideStart);
    }

    fn show_game_over_overlay(&mut self) {
        self.game_over_visible = true;
        self.record(PresentCommand::ShowGameOver);
    }

    fn hide_game_over_overlay(&mut self) {
        self.game_over_visible = false;
        self.record(PresentCommand::HideGameOver);
    }

    fn set_score_text(&mut self, score: u64) {
        self.score_text = Some(score);
        self.record(PresentCommand::Score(score));
    }

    fn set_fps_text(&mut self, fps: Option<u32>) {
        self.fps_text = fps;
        self.record(PresentCommand::Fps(fps));
    }
}

/// Audio sink that only tracks play state
#[derive(Debug, Clone, Default)]
pub struct SilentAudio {
    pub playing: bool,
    /// Times the loop was rewound
    pub resets: u32,
    pub volume: f32,
}

impl AudioSink for SilentAudio {
    fn play_loop(&mut self) {
        log::debug!("bgm: play");
        self.playing = true;
    }

    fn pause_loop(&mut self) {
        log::debug!("bgm: pause");
        self.playing = false;
    }

    fn reset_loop(&mut self) {
        self.resets += 1;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

/// A fixed set of held signals
#[derive(Debug, Clone, Default)]
pub struct HeldSignals {
    held: HashSet<Signal>,
}

impl HeldSignals {
    pub fn new(signals: impl IntoIterator<Item = Signal>) -> Self {
        Self {
            held: signals.into_iter().collect(),
        }
    }

    pub fn press(&mut self, signal: Signal) {
        self.held.insert(signal);
    }

    pub fn release(&mut self, signal: Signal) {
        self.held.remove(&signal);
    }
}

impl InputSource for HeldSignals {
    fn is_held(&self, signal: Signal) -> bool {
        self.held.contains(&signal)
    }
}
