//! Buhio Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use buhio_run::audio::BgmPlayer;
    use buhio_run::persistence::{LocalStorage, MemoryStorage, Storage};
    use buhio_run::platform::web::{DomPresenter, KeyboardInput};
    use buhio_run::{Game, HighScores, Settings, Tuning};

    const BGM_URL: &str = "bgm.mp3";

    type WebGame = Game<DomPresenter, BgmPlayer>;

    /// Everything the browser callbacks share
    struct App {
        game: WebGame,
        input: KeyboardInput,
        storage: Box<dyn Storage>,
    }

    fn open_storage() -> Box<dyn Storage> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{} - progress will not be saved", e);
                Box::new(MemoryStorage::default())
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Buhio Run starting...");

        let Some(presenter) = DomPresenter::new() else {
            log::error!("Page is missing the #track element");
            return;
        };

        let storage = open_storage();
        let settings = Settings::load(storage.as_ref());
        let tuning = Tuning::load(storage.as_ref());
        let high_scores = HighScores::load(storage.as_ref());
        let audio = BgmPlayer::new(BGM_URL);

        let seed = js_sys::Date::now() as u64;
        log::info!("Session seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, tuning, settings, high_scores, presenter, audio),
            input: KeyboardInput::install(),
            storage,
        }));

        setup_start_button(app.clone());
        setup_settings_toggle(app.clone(), "mute-btn", |s| s.muted = !s.muted);
        setup_settings_toggle(app.clone(), "fps-btn", |s| s.show_fps = !s.show_fps);
        setup_settings_toggle(app.clone(), "motion-btn", |s| {
            s.reduced_motion = !s.reduced_motion
        });
        request_animation_frame(app);
    }

    fn setup_start_button(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #start-btn - runs cannot be started");
        }
    }

    /// Flip a preference from a button, apply it and persist it
    fn setup_settings_toggle(app: Rc<RefCell<App>>, id: &str, toggle: fn(&mut Settings)) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(btn) = document.get_element_by_id(id) else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut app = app.borrow_mut();
            let mut settings = app.game.settings().clone();
            toggle(&mut settings);
            settings.save(app.storage.as_mut());
            app.game.set_settings(settings);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut app = app.borrow_mut();
            let App {
                game,
                input,
                storage,
            } = &mut *app;

            if let Some(summary) = game.frame(&*input, time) {
                if let Some(rank) = summary.rank {
                    log::info!("New high score #{}: {}", rank, summary.score);
                }
                game.high_scores.save(storage.as_mut());
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::path::PathBuf;
    use std::thread;

    use buhio_run::consts::FRAME_MS;
    use buhio_run::game::RunSummary;
    use buhio_run::persistence::FileStorage;
    use buhio_run::platform::headless::{RecordingPresenter, SilentAudio};
    use buhio_run::sim::autopilot;
    use buhio_run::{Game, HighScores, Settings, Tuning};

    const DATA_DIR_ENV: &str = "BUHIO_RUN_DATA";
    const DEFAULT_DATA_DIR: &str = ".buhio-run";
    const SEED_ENV: &str = "BUHIO_RUN_SEED";
    /// Five simulated minutes at 60 Hz
    const MAX_FRAMES: u64 = 5 * 60 * 60;

    fn session_seed() -> u64 {
        match std::env::var(SEED_ENV) {
            Ok(text) => match text.trim().parse() {
                Ok(seed) => seed,
                Err(e) => {
                    log::warn!("Ignoring {}={:?}: {}", SEED_ENV, text, e);
                    rand::random()
                }
            },
            Err(_) => rand::random(),
        }
    }

    /// Play one autopilot run to completion or the frame cap
    fn play(game: &mut Game<RecordingPresenter, SilentAudio>) -> Option<RunSummary> {
        game.start();
        let mut now_ms = 0.0;
        for _ in 0..MAX_FRAMES {
            let input = autopilot::steer(&game.state);
            let summary = game.frame(&input, now_ms);
            game.presenter.take_commands();
            if summary.is_some() {
                return summary;
            }
            now_ms += FRAME_MS;
        }
        None
    }

    pub fn run() {
        let data_dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let mut storage = FileStorage::new(data_dir);
        log::info!("Data directory: {}", storage.dir().display());

        let settings = Settings::load(&storage);
        let tuning = Tuning::load(&storage);
        let high_scores = HighScores::load(&storage);
        let seed = session_seed();
        log::info!("Session seed: {}", seed);

        let sim = thread::Builder::new().name("sim".into()).spawn(move || {
            let mut game = Game::new(
                seed,
                tuning,
                settings,
                high_scores,
                RecordingPresenter::default(),
                SilentAudio::default(),
            );
            let summary = play(&mut game);
            (summary, game)
        });

        let handle = match sim {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("Failed to spawn simulation thread: {}", e);
                return;
            }
        };

        let (summary, game) = match handle.join() {
            Ok(result) => result,
            Err(_) => {
                log::error!("Simulation thread panicked");
                return;
            }
        };

        match summary {
            Some(summary) => {
                log::info!(
                    "Run over: score {} ({} obstacles passed)",
                    summary.score,
                    summary.obstacles_passed
                );
                if let Some(rank) = summary.rank {
                    log::info!("New high score #{}", rank);
                }
            }
            None => log::info!(
                "Frame cap reached: score {} after {} frames",
                game.state.score,
                game.state.frame
            ),
        }

        game.high_scores.save(&mut storage);
        // Writes defaults on first run so the file can be edited
        game.settings().save(&mut storage);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Buhio Run (headless) starting...");
    native_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
