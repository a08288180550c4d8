//! Capability seam between the visualizer and whatever draws it.

use crate::domain::Settings;
use crate::systems::animation::Mark;

use super::camera::Environment;

/// One redraw request
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Seconds since the animation loop started
    pub time_s: f64,
    pub settings: &'a Settings,
    pub marks: &'a [Mark],
    /// Column-major 4x4 matrix per mark
    pub instance_matrices: &'a [f32],
}

/// A drawing target owned by exactly one visualizer.
pub trait RenderSurface {
    /// True once a surface exists for this element
    fn has_surface(&self) -> bool;

    fn create_surface(&mut self, environment: &Environment) -> Result<(), String>;

    /// Match an existing surface to a rebuilt environment
    fn resize(&mut self, environment: &Environment) -> Result<(), String>;

    fn submit_frame(&mut self, environment: &Environment, frame: &Frame<'_>) -> Result<(), String>;
}

/// Create the surface unless one already exists, in which case it is resized
/// to `environment`. Returns whether a surface was created.
pub fn setup_surface<S: RenderSurface + ?Sized>(
    surface: &mut S,
    environment: &Environment,
) -> Result<bool, String> {
    if surface.has_surface() {
        surface.resize(environment)?;
        return Ok(false);
    }
    surface.create_surface(environment)?;
    Ok(true)
}
