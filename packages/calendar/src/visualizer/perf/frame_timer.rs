/// Wall-clock stopwatch; `Date.now()` on wasm32, `Instant` elsewhere.
#[derive(Clone, Copy)]
pub(crate) struct FrameTimer {
    #[cfg(target_arch = "wasm32")]
    started_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    started: std::time::Instant,
}

impl FrameTimer {
    pub(crate) fn start() -> Self {
        FrameTimer {
            #[cfg(target_arch = "wasm32")]
            started_ms: js_sys::Date::now(),
            #[cfg(not(target_arch = "wasm32"))]
            started: std::time::Instant::now(),
        }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            (js_sys::Date::now() - self.started_ms).max(0.0)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.started.elapsed().as_secs_f64() * 1000.0
        }
    }
}
