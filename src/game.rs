//! Run controller
//!
//! Drives the simulation once per host frame and turns what happened into
//! presenter and audio calls. Hosts own the scheduling (animation frame
//! callback, timer, or a fixed-step thread) and simply call `frame`.

use crate::highscores::{HighScoreEntry, HighScores};
use crate::platform::{AudioSink, InputSource, Presenter, unix_time_ms};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, RunPhase, tick};
use crate::tuning::Tuning;

/// Shown on the start overlay before the first run
pub const START_PROMPT: &str = "Press Start to run!";

/// Host frames averaged by the frame-rate readout
const FPS_WINDOW: usize = 60;

/// Frame rate over the last `FPS_WINDOW` host frames
#[derive(Debug, Clone)]
struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    index: usize,
    samples: usize,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            index: 0,
            samples: 0,
        }
    }

    /// Record a frame; `None` until the window has filled
    fn record(&mut self, now_ms: f64) -> Option<u32> {
        let oldest = self.frame_times[self.index];
        self.frame_times[self.index] = now_ms;
        self.index = (self.index + 1) % FPS_WINDOW;
        self.samples = self.samples.saturating_add(1);
        if self.samples <= FPS_WINDOW {
            return None;
        }
        let elapsed = now_ms - oldest;
        (elapsed > 0.0).then(|| (FPS_WINDOW as f64 * 1000.0 / elapsed).round() as u32)
    }
}

/// Outcome of a run that ended this frame
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub score: u64,
    pub obstacles_passed: u64,
    /// Leaderboard rank reached (1-indexed), if any
    pub rank: Option<usize>,
}

pub struct Game<P: Presenter, A: AudioSink> {
    pub state: GameState,
    pub presenter: P,
    pub audio: A,
    pub high_scores: HighScores,
    settings: Settings,
    last_time_ms: Option<f64>,
    fps: FpsCounter,
}

impl<P: Presenter, A: AudioSink> Game<P, A> {
    /// Create an idle game showing the start overlay
    pub fn new(
        seed: u64,
        tuning: Tuning,
        settings: Settings,
        high_scores: HighScores,
        mut presenter: P,
        mut audio: A,
    ) -> Self {
        presenter.hide_game_over_overlay();
        presenter.show_start_overlay(START_PROMPT);
        presenter.set_score_text(0);
        presenter.set_fps_text(None);
        audio.set_volume(settings.effective_music_volume());

        Self {
            state: GameState::new(seed, tuning),
            presenter,
            audio,
            high_scores,
            settings,
            last_time_ms: None,
            fps: FpsCounter::new(),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply changed preferences immediately
    pub fn set_settings(&mut self, settings: Settings) {
        self.audio.set_volume(settings.effective_music_volume());
        if !settings.show_fps {
            self.presenter.set_fps_text(None);
        }
        log::debug!("Settings changed: {:?}", settings);
        self.settings = settings;
    }

    /// Begin a run from idle or after a game over.
    ///
    /// Ignored while a run is in progress.
    pub fn start(&mut self) -> bool {
        if !self.state.start_run() {
            return false;
        }
        // The next frame starts the run clock
        self.last_time_ms = None;
        self.dispatch_events();
        self.sync_poses();
        true
    }

    /// Advance one host frame.
    ///
    /// `now_ms` is the host's monotonic clock. Returns a summary when the run
    /// ended during this frame.
    pub fn frame(&mut self, input: &dyn InputSource, now_ms: f64) -> Option<RunSummary> {
        let dt_ms = match self.last_time_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);

        let fps = self.fps.record(now_ms);
        if self.settings.show_fps && fps.is_some() {
            self.presenter.set_fps_text(fps);
        }

        if !self.state.is_running() {
            return None;
        }

        let input = input.sample();
        tick(&mut self.state, &input, dt_ms);

        self.presenter.set_score_text(self.state.score);
        let summary = self.dispatch_events();
        self.sync_poses();
        summary
    }

    /// Translate pending simulation events into collaborator calls
    fn dispatch_events(&mut self) -> Option<RunSummary> {
        let mut summary = None;

        for event in self.state.drain_events() {
            match event {
                GameEvent::RunStarted { cleared } => {
                    for id in cleared {
                        self.presenter.remove_obstacle_visual(id);
                    }
                    self.presenter.hide_start_overlay();
                    self.presenter.hide_game_over_overlay();
                    self.presenter.set_score_text(0);
                    self.audio.reset_loop();
                    self.audio.play_loop();
                }
                GameEvent::ObstacleSpawned { id, variant, lane } => {
                    self.presenter.add_obstacle_visual(id, variant, lane);
                }
                GameEvent::ObstaclePassed { id } => {
                    self.presenter.remove_obstacle_visual(id);
                }
                GameEvent::ScoreChanged { score } => {
                    log::debug!("Score: {}", score);
                }
                GameEvent::Jumped | GameEvent::Landed => {
                    log::trace!("{:?}", event);
                }
                GameEvent::RunEnded { score } => {
                    summary = Some(self.finish_run(score));
                }
            }
        }

        summary
    }

    fn finish_run(&mut self, score: u64) -> RunSummary {
        self.audio.pause_loop();

        let obstacles_passed = self.state.obstacles_passed;
        let previous_best = self.high_scores.top_score();
        let rank = self.high_scores.add_score(HighScoreEntry {
            score,
            obstacles_passed,
            duration_ms: self.state.elapsed_ms,
            end_speed: self.state.scroll_speed,
            timestamp: unix_time_ms(),
        });

        let message = match (rank, previous_best) {
            (Some(1), _) => format!("Final score: {score} (new best!)"),
            (_, Some(best)) => format!("Final score: {score} (best: {best})"),
            (_, None) => format!("Final score: {score}"),
        };

        self.presenter.show_game_over_overlay();
        self.presenter.show_start_overlay(&message);

        RunSummary {
            score,
            obstacles_passed,
            rank,
        }
    }

    fn sync_poses(&mut self) {
        self.presenter
            .set_player_pose(self.state.player_pose(self.settings.run_sway()));
        for obstacle in self.state.obstacles.iter() {
            self.presenter.set_obstacle_pose(obstacle.pose());
        }
    }
}
