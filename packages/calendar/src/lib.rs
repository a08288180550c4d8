//! Stoic Calendar - life-in-weeks visualization in WASM
//!
//! Architecture:
//! - core/       - Logging bootstrap
//! - domain/     - Birth dates, calendar derivation, settings
//! - systems/    - Per-frame mark transforms
//! - render/     - Camera and drawing surfaces (canvas + headless)
//! - visualizer/ - Orchestration for one element
//! - api/        - Public wasm-bindgen API

pub mod core;
pub mod domain;
pub mod systems;
pub mod render;
pub mod visualizer;
pub mod api;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize panic reporting and console logging
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    if let Err(e) = crate::core::logging::init_logging(crate::core::logging::DEFAULT_LOG_LEVEL) {
        web_sys::console::warn_1(&e.into());
    }
    log::info!("stoic calendar {} initialized", version());
}

/// Change the console log level (`error`, `warn`, `info`, `debug`, `trace`, `off`)
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    crate::core::logging::init_logging(level).map_err(|e| JsValue::from_str(&e))
}

/// Get crate version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::StoicCalendar;
pub use domain::{Calendar, Settings};
pub use render::{HeadlessSurface, RenderSurface};
pub use visualizer::VisualizerCore;
