//! Visualizer - the life calendar behind one `<stoic-calendar>` element
//!
//! Owns the settings, the derived calendar and the drawing surface, and turns
//! each animation tick into exactly one submitted frame. The browser loop and
//! DOM wiring live in `api::wasm`; everything here runs headless.

use chrono::NaiveDateTime;

use crate::domain::{Calendar, Settings};
use crate::render::surface::setup_surface;
use crate::render::{Environment, Frame, RenderSurface, Viewport};
use crate::systems::animation::{build_marks, write_instance_matrices, Mark};

#[path = "perf/frame_timer.rs"]
mod frame_timer;
#[path = "perf/frame_stats.rs"]
mod frame_stats;
#[path = "state/animation_state.rs"]
mod animation_state;
#[path = "attributes/attributes.rs"]
mod attributes;

pub use animation_state::AnimationState;
pub use attributes::{AttributeName, OBSERVED_ATTRIBUTES};
pub use frame_stats::{FrameStats, FPS_WINDOW_MS};

use frame_stats::FrameRateMeter;
use frame_timer::FrameTimer;

pub struct VisualizerCore<S: RenderSurface> {
    settings: Settings,
    calendar: Option<Calendar>,
    surface: S,
    environment: Option<Environment>,
    state: AnimationState,

    // Per-frame scratch, rebuilt every tick
    marks: Vec<Mark>,
    instance_matrices: Vec<f32>,
    // The surface still shows marks from an earlier frame
    ring_visible: bool,

    frame_rate: FrameRateMeter,
    stats: FrameStats,
}

impl<S: RenderSurface> VisualizerCore<S> {
    pub fn new(surface: S) -> Self {
        Self::with_settings(surface, Settings::default())
    }

    pub fn with_settings(surface: S, settings: Settings) -> Self {
        VisualizerCore {
            settings,
            calendar: None,
            surface,
            environment: None,
            state: AnimationState::Idle,
            marks: Vec::new(),
            instance_matrices: Vec::new(),
            ring_visible: false,
            frame_rate: FrameRateMeter::default(),
            stats: FrameStats::default(),
        }
    }

    pub fn settings(&self) -> &Settings { &self.settings }

    pub fn calendar(&self) -> Option<&Calendar> { self.calendar.as_ref() }

    pub fn state(&self) -> AnimationState { self.state }

    pub fn environment(&self) -> Option<&Environment> { self.environment.as_ref() }

    pub fn surface(&self) -> &S { &self.surface }

    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }

    pub fn marks(&self) -> &[Mark] { &self.marks }

    /// Column-major 4x4 matrices from the last submitted frame
    pub fn instance_matrices(&self) -> &[f32] { &self.instance_matrices }

    pub fn frame_stats(&self) -> FrameStats { self.stats }

    /// React to an attribute change. Returns whether settings were replaced.
    ///
    /// Birth date and color problems are logged and absorbed; only a malformed
    /// `settings` JSON override is an error.
    pub fn attribute_changed(
        &mut self,
        name: &str,
        value: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<bool, String> {
        attributes::attribute_changed(self, name, value, now)
    }

    /// Swap in a new settings record and re-derive everything from it.
    pub fn replace_settings(&mut self, next: Settings, now: NaiveDateTime) {
        self.calendar = next.birth_date.map(|birth| Calendar::derive(birth, now));
        log::debug!(
            "settings v{} applied, {} weeks elapsed",
            next.version,
            self.calendar.as_ref().map(|c| c.elapsed_count()).unwrap_or(0)
        );
        self.settings = next;
        self.marks.clear();
        self.instance_matrices.clear();
        self.state = self.state.restarted();
        self.frame_rate.reset();
    }

    /// Recompute the calendar against a new "now" without touching settings.
    pub fn refresh_calendar(&mut self, now: NaiveDateTime) {
        self.calendar = self.settings.birth_date.map(|birth| Calendar::derive(birth, now));
    }

    /// Build the camera and create the surface if it does not exist yet.
    /// Returns whether a new surface was created.
    pub fn setup_environment(&mut self, viewport: Viewport) -> Result<bool, String> {
        let environment = match self.environment {
            Some(env) => env,
            None => Environment::new(viewport),
        };
        let created = setup_surface(&mut self.surface, &environment)?;
        self.environment = Some(environment);
        Ok(created)
    }

    /// Set up the environment and enter the animating state.
    pub fn connect(&mut self, viewport: Viewport) -> Result<(), String> {
        self.setup_environment(viewport)?;
        if !self.state.is_animating() {
            self.state = AnimationState::Animating { started_at_ms: None };
            self.frame_rate.reset();
            log::info!("animation started");
        }
        Ok(())
    }

    /// Stop animating. The environment is rebuilt on the next connect.
    pub fn disconnect(&mut self) {
        if self.state.is_animating() {
            log::info!("animation stopped after {} frames", self.stats.frames_submitted);
        }
        self.state = AnimationState::Idle;
        self.environment = None;
    }

    /// Advance one display refresh at `now_ms` (monotonic milliseconds).
    ///
    /// Submits at most one frame. Returns whether the host should schedule
    /// another tick.
    pub fn tick(&mut self, now_ms: f64) -> Result<bool, String> {
        let started_at = match self.state {
            AnimationState::Idle => return Ok(false),
            AnimationState::Animating { started_at_ms: Some(start) } => start,
            AnimationState::Animating { started_at_ms: None } => {
                self.state = AnimationState::Animating { started_at_ms: Some(now_ms) };
                now_ms
            }
        };

        let Some(environment) = self.environment else {
            return Ok(true);
        };
        let t = ((now_ms - started_at) / 1000.0).max(0.0);

        // No birth date, nothing drawn; keep ticking so a later attribute can start it.
        let Some(calendar) = self.calendar.as_ref() else {
            if self.ring_visible {
                self.blank_surface(&environment, t)?;
            }
            return Ok(true);
        };

        let timer = FrameTimer::start();
        build_marks(&self.settings, calendar, t, &mut self.marks);
        write_instance_matrices(&self.marks, &mut self.instance_matrices);

        let frame = Frame {
            time_s: t,
            settings: &self.settings,
            marks: &self.marks,
            instance_matrices: &self.instance_matrices,
        };
        self.surface.submit_frame(&environment, &frame)?;
        self.ring_visible = !self.marks.is_empty();

        self.stats.frames_submitted = self.stats.frames_submitted.wrapping_add(1);
        self.stats.last_build_ms = timer.elapsed_ms();
        if let Some(fps) = self.frame_rate.record(now_ms) {
            self.stats.fps = fps;
            log::debug!("{:.2} fps", fps);
        }
        Ok(true)
    }

    /// Paint the background only, wiping a ring left from an earlier calendar.
    fn blank_surface(&mut self, environment: &Environment, t: f64) -> Result<(), String> {
        let frame = Frame {
            time_s: t,
            settings: &self.settings,
            marks: &[],
            instance_matrices: &[],
        };
        self.surface.submit_frame(environment, &frame)?;
        self.ring_visible = false;
        self.stats.frames_submitted = self.stats.frames_submitted.wrapping_add(1);
        log::debug!("calendar cleared, surface blanked");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
