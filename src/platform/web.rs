//! Browser collaborators
//!
//! - `DomPresenter`: score text, overlays and a top-down lane view built from
//!   absolutely positioned elements inside `#track`
//! - `KeyboardInput`: held-key tracking from window key events

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use super::{InputSource, Presenter, Signal};
use crate::consts::*;
use crate::sim::{ObstaclePose, PlayerPose};

/// Lateral world span shown across the track (one lane of margin per side)
const VIEW_HALF_WIDTH: f32 = LANE_WIDTH * 1.5;

/// Map world (x, z) to percentages of the track element (left, top)
fn track_percent(x: f32, z: f32) -> (f32, f32) {
    let left = (x + VIEW_HALF_WIDTH) / (2.0 * VIEW_HALF_WIDTH) * 100.0;
    let top = (z - SPAWN_DISTANCE) / (RETIRE_PLANE - SPAWN_DISTANCE) * 100.0;
    (left, top)
}

fn set_style(element: &Element, name: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(name, value);
    }
}

fn set_visible(element: &Option<Element>, visible: bool) {
    if let Some(element) = element {
        set_style(element, "display", if visible { "block" } else { "none" });
    }
}

/// DOM-backed presenter
pub struct DomPresenter {
    document: Document,
    track: Element,
    player: Option<Element>,
    score: Option<Element>,
    fps: Option<Element>,
    start_screen: Option<Element>,
    game_over: Option<Element>,
}

impl DomPresenter {
    /// Bind to the page's elements; `None` if the track container is missing
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let track = document.get_element_by_id("track")?;
        Some(Self {
            player: document.get_element_by_id("player"),
            score: document.get_element_by_id("score"),
            fps: document.get_element_by_id("fps"),
            start_screen: document.get_element_by_id("start-screen"),
            game_over: document.get_element_by_id("game-over"),
            track,
            document,
        })
    }

    fn obstacle_element(&self, id: u32) -> Option<Element> {
        self.document.get_element_by_id(&format!("obstacle-{id}"))
    }
}

impl Presenter for DomPresenter {
    fn set_player_pose(&mut self, pose: PlayerPose) {
        let Some(player) = &self.player else { return };
        let (left, top) = track_percent(pose.position.x, 0.0);
        set_style(player, "left", &format!("{left}%"));
        set_style(player, "top", &format!("{top}%"));
        // Height shows as scale, sway as rotation
        let scale = 1.0 + (pose.position.y - PLAYER_RENDER_LIFT) * 0.15;
        set_style(
            player,
            "transform",
            &format!("translate(-50%, -50%) scale({scale}) rotate({}rad)", pose.tilt),
        );
    }

    fn add_obstacle_visual(&mut self, id: u32, variant: u8, lane: f32) {
        let element = match self.document.create_element("div") {
            Ok(element) => element,
            Err(e) => {
                log::warn!("Failed to create obstacle element: {:?}", e);
                return;
            }
        };
        element.set_id(&format!("obstacle-{id}"));
        element.set_class_name(&format!("obstacle variant-{variant}"));
        let (left, top) = track_percent(lane, SPAWN_DISTANCE);
        set_style(&element, "left", &format!("{left}%"));
        set_style(&element, "top", &format!("{top}%"));
        if let Err(e) = self.track.append_child(&element) {
            log::warn!("Failed to attach obstacle element: {:?}", e);
        }
    }

    fn set_obstacle_pose(&mut self, pose: ObstaclePose) {
        let Some(element) = self.obstacle_element(pose.id) else {
            return;
        };
        let (left, top) = track_percent(pose.position.x, pose.position.z);
        set_style(&element, "left", &format!("{left}%"));
        set_style(&element, "top", &format!("{top}%"));
    }

    fn remove_obstacle_visual(&mut self, id: u32) {
        if let Some(element) = self.obstacle_element(id) {
            element.remove();
        }
    }

    fn show_start_overlay(&mut self, message: &str) {
        set_visible(&self.start_screen, true);
        let Some(screen) = &self.start_screen else { return };
        if let Ok(Some(p)) = screen.query_selector("p") {
            p.set_text_content(Some(message));
        }
    }

    fn hide_start_overlay(&mut self) {
        set_visible(&self.start_screen, false);
    }

    fn show_game_over_overlay(&mut self) {
        set_visible(&self.game_over, true);
    }

    fn hide_game_over_overlay(&mut self) {
        set_visible(&self.game_over, false);
    }

    fn set_score_text(&mut self, score: u64) {
        if let Some(el) = &self.score {
            el.set_text_content(Some(&format!("Score: {score}")));
        }
    }

    fn set_fps_text(&mut self, fps: Option<u32>) {
        set_visible(&self.fps, fps.is_some());
        if let (Some(el), Some(fps)) = (&self.fps, fps) {
            el.set_text_content(Some(&format!("{fps} FPS")));
        }
    }
}

fn signal_for(code: &str) -> Option<Signal> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Signal::MoveLeft),
        "ArrowRight" | "KeyD" => Some(Signal::MoveRight),
        "Space" => Some(Signal::Jump),
        _ => None,
    }
}

/// Keys currently held, fed by window keydown/keyup listeners
#[derive(Clone, Default)]
pub struct KeyboardInput {
    held: Rc<RefCell<HashSet<Signal>>>,
}

impl KeyboardInput {
    /// Register listeners on the window
    pub fn install() -> Self {
        let input = Self::default();
        let Some(window) = web_sys::window() else {
            log::warn!("No window - keyboard input disabled");
            return input;
        };

        {
            let held = input.held.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(signal) = signal_for(&event.code()) {
                    event.prevent_default();
                    held.borrow_mut().insert(signal);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let held = input.held.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(signal) = signal_for(&event.code()) {
                    held.borrow_mut().remove(&signal);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            // Keys released while the window is unfocused never send keyup
            let held = input.held.clone();
            let closure = Closure::<dyn FnMut()>::new(move || held.borrow_mut().clear());
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        input
    }
}

impl InputSource for KeyboardInput {
    fn is_held(&self, signal: Signal) -> bool {
        self.held.borrow().contains(&signal)
    }
}
