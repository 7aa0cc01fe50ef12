//! Background music over an HTML `<audio>` element
//!
//! Playback can be rejected by the browser (autoplay policy, missing file).
//! That is logged and otherwise ignored; the run carries on silently.

use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlAudioElement;

use crate::platform::AudioSink;

/// Looping background track
pub struct BgmPlayer {
    element: Option<HtmlAudioElement>,
}

impl BgmPlayer {
    /// Create a looping track from `url`; volume is applied by the run controller
    pub fn new(url: &str) -> Self {
        let element = match HtmlAudioElement::new_with_src(url) {
            Ok(element) => {
                element.set_loop(true);
                Some(element)
            }
            Err(e) => {
                log::warn!("Failed to create audio element - music disabled: {:?}", e);
                None
            }
        };
        Self { element }
    }
}

impl AudioSink for BgmPlayer {
    fn play_loop(&mut self) {
        let Some(element) = &self.element else { return };
        match element.play() {
            Ok(promise) => {
                let on_reject = Closure::<dyn FnMut(JsValue)>::new(|e: JsValue| {
                    log::warn!("BGM play failed: {:?}", e);
                });
                let _ = promise.catch(&on_reject);
                on_reject.forget();
            }
            Err(e) => log::warn!("BGM play failed: {:?}", e),
        }
    }

    fn pause_loop(&mut self) {
        let Some(element) = &self.element else { return };
        if let Err(e) = element.pause() {
            log::warn!("BGM pause failed: {:?}", e);
        }
    }

    fn reset_loop(&mut self) {
        if let Some(element) = &self.element {
            element.set_current_time(0.0);
        }
    }

    fn set_volume(&mut self, volume: f32) {
        if let Some(element) = &self.element {
            element.set_volume(volume.clamp(0.0, 1.0) as f64);
        }
    }
}
