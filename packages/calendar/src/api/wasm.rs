use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, NaiveDateTime, Utc};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::render::CanvasSurface;
use crate::visualizer::{FrameStats, VisualizerCore, OBSERVED_ATTRIBUTES};

use super::animation_loop::AnimationLoop;

/// Local wall-clock time from the browser clock and timezone offset.
fn local_now() -> NaiveDateTime {
    let now = js_sys::Date::new_0();
    let offset_ms = now.get_timezone_offset() * 60_000.0;
    let local_ms = (now.get_time() - offset_ms) as i64;
    DateTime::<Utc>::from_timestamp_millis(local_ms)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

/// Attribute names for `static get observedAttributes()`
#[wasm_bindgen(js_name = observedAttributes)]
pub fn observed_attributes() -> Vec<String> {
    OBSERVED_ATTRIBUTES.iter().map(|s| s.to_string()).collect()
}

/// Backing object for one `<stoic-calendar>` element
#[wasm_bindgen]
pub struct StoicCalendar {
    core: Rc<RefCell<VisualizerCore<CanvasSurface>>>,
    animation: Option<AnimationLoop>,
}

#[wasm_bindgen]
impl StoicCalendar {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: Rc::new(RefCell::new(VisualizerCore::new(CanvasSurface::new()))),
            animation: None,
        }
    }

    /// Forward of `attributeChangedCallback`; `value` is null when removed.
    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(&mut self, name: &str, value: Option<String>) -> Result<(), JsValue> {
        self.core
            .borrow_mut()
            .attribute_changed(name, value.as_deref(), local_now())
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    /// Forward of `connectedCallback`: build the surface and start the loop.
    pub fn connected(&mut self, host: HtmlElement) -> Result<(), JsValue> {
        let viewport = CanvasSurface::viewport_from_window().map_err(|e| JsValue::from_str(&e))?;
        {
            let mut core = self.core.borrow_mut();
            core.surface_mut().attach(host);
            core.refresh_calendar(local_now());
            core.connect(viewport).map_err(|e| JsValue::from_str(&e))?;
        }

        let running = self.animation.as_ref().map(|l| !l.is_cancelled()).unwrap_or(false);
        if !running {
            let core = Rc::clone(&self.core);
            let animation = AnimationLoop::start(move |timestamp| {
                match core.borrow_mut().tick(timestamp) {
                    Ok(again) => again,
                    Err(e) => {
                        log::warn!("frame dropped: {}", e);
                        true
                    }
                }
            })
            .map_err(|e| JsValue::from_str(&e))?;
            self.animation = Some(animation);
        }
        Ok(())
    }

    /// Forward of `disconnectedCallback`: cancel the loop.
    pub fn disconnected(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.cancel();
        }
        self.core.borrow_mut().disconnect();
    }

    #[wasm_bindgen(getter)]
    pub fn animating(&self) -> bool {
        self.core.borrow().state().is_animating()
    }

    /// Elapsed weeks, or -1 when there is no calendar
    #[wasm_bindgen(getter)]
    pub fn elapsed_weeks(&self) -> i32 {
        self.core
            .borrow()
            .calendar()
            .map(|c| c.elapsed_count() as i32)
            .unwrap_or(-1)
    }

    #[wasm_bindgen(getter)]
    pub fn calendar_len(&self) -> u32 {
        crate::domain::CALENDAR_LEN as u32
    }

    /// Calendar cells as bytes (1 = elapsed); empty when there is no calendar
    pub fn calendar_cells(&self) -> Vec<u8> {
        self.core
            .borrow()
            .calendar()
            .map(|c| c.cells())
            .unwrap_or_default()
    }

    #[wasm_bindgen(getter)]
    pub fn settings_version(&self) -> f64 {
        self.core.borrow().settings().version as f64
    }

    pub fn settings_json(&self) -> String {
        self.core.borrow().settings().to_json()
    }

    /// Instance matrices of the last frame, 16 floats per mark
    pub fn instance_matrices(&self) -> Vec<f32> {
        self.core.borrow().instance_matrices().to_vec()
    }

    pub fn frame_stats(&self) -> FrameStats {
        self.core.borrow().frame_stats()
    }
}

impl Default for StoicCalendar {
    fn default() -> Self {
        Self::new()
    }
}
