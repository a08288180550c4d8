use wasm_bindgen::prelude::*;

/// Window over which frames are counted before fps is reported
pub const FPS_WINDOW_MS: f64 = 1000.0;

#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub(super) frames_submitted: u32,
    pub(super) last_build_ms: f64,
    pub(super) fps: f64,
}

#[wasm_bindgen]
impl FrameStats {
    #[wasm_bindgen(getter)]
    pub fn frames_submitted(&self) -> u32 { self.frames_submitted }
    #[wasm_bindgen(getter)]
    pub fn last_build_ms(&self) -> f64 { self.last_build_ms }
    /// Most recent fps measurement, 0 until the first full window
    #[wasm_bindgen(getter)]
    pub fn fps(&self) -> f64 { self.fps }
}

/// Counts frames and reports the rate once per `FPS_WINDOW_MS`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FrameRateMeter {
    window_start_ms: Option<f64>,
    frames: u32,
}

impl FrameRateMeter {
    pub(crate) fn reset(&mut self) {
        *self = FrameRateMeter::default();
    }

    /// Record a frame at `now_ms`; yields fps when a window closes.
    pub(crate) fn record(&mut self, now_ms: f64) -> Option<f64> {
        let start = *self.window_start_ms.get_or_insert(now_ms);
        self.frames += 1;
        let elapsed = now_ms - start;
        if elapsed < FPS_WINDOW_MS {
            return None;
        }
        let fps = self.frames as f64 / (elapsed / 1000.0);
        self.frames = 0;
        self.window_start_ms = Some(now_ms);
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_window() {
        let mut meter = FrameRateMeter::default();
        let mut reports = Vec::new();
        // 60 Hz for a bit over two seconds
        for i in 0..=125 {
            if let Some(fps) = meter.record(i as f64 * 1000.0 / 60.0) {
                reports.push(fps);
            }
        }
        assert_eq!(reports.len(), 2);
        assert!((reports[0] - 61.0).abs() < 0.5);
    }
}
