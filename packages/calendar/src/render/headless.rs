use crate::systems::animation::Mark;

use super::camera::Environment;
use super::surface::{Frame, RenderSurface};

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedFrame {
    pub time_s: f64,
    pub settings_version: u64,
    pub marks: Vec<Mark>,
    pub instance_matrices: Vec<f32>,
}

/// In-memory surface that records what it was asked to draw.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    surfaces_created: usize,
    resizes: usize,
    environment: Option<Environment>,
    frames: Vec<RecordedFrame>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surfaces_created(&self) -> usize {
        self.surfaces_created
    }

    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    pub fn resizes(&self) -> usize {
        self.resizes
    }
}

impl RenderSurface for HeadlessSurface {
    fn has_surface(&self) -> bool {
        self.environment.is_some()
    }

    fn create_surface(&mut self, environment: &Environment) -> Result<(), String> {
        self.surfaces_created += 1;
        self.environment = Some(*environment);
        Ok(())
    }

    fn resize(&mut self, environment: &Environment) -> Result<(), String> {
        if self.environment.is_none() {
            return Err("resize before surface was created".to_string());
        }
        if self.environment.as_ref() != Some(environment) {
            self.resizes += 1;
            self.environment = Some(*environment);
        }
        Ok(())
    }

    fn submit_frame(&mut self, _environment: &Environment, frame: &Frame<'_>) -> Result<(), String> {
        if self.environment.is_none() {
            return Err("frame submitted before surface was created".to_string());
        }
        self.frames.push(RecordedFrame {
            time_s: frame.time_s,
            settings_version: frame.settings.version,
            marks: frame.marks.to_vec(),
            instance_matrices: frame.instance_matrices.to_vec(),
        });
        Ok(())
    }
}
