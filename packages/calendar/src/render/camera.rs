use glam::{Mat4, Vec3};

pub const FIELD_OF_VIEW_DEG: f64 = 75.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;
pub const VIEW_DISTANCE: f32 = 5.0;

/// Size of the drawing surface in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width / height, or 1.0 when the viewport is degenerate
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 && self.width > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Perspective camera on the +z axis looking at the origin.
///
/// The aspect ratio is fixed when the environment is built. Window resizes
/// while connected are not tracked; a reconnect rebuilds the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub fov_deg: f64,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Camera {
    pub fn perspective(aspect: f32) -> Self {
        Self {
            fov_deg: FIELD_OF_VIEW_DEG,
            aspect,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            position: Vec3::new(0.0, 0.0, VIEW_DISTANCE),
        }
    }

    /// Projection * view, camera looking down -z at the origin
    pub fn view_projection(&self) -> Mat4 {
        let projection =
            Mat4::perspective_rh(self.fov_deg.to_radians() as f32, self.aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y);
        projection * view
    }

    /// Project a world point to viewport pixels (origin top-left).
    ///
    /// `None` when the point falls outside the near/far range.
    pub fn project(&self, point: Vec3, viewport: Viewport) -> Option<(f32, f32)> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        // perspective_rh maps depth to [0, 1]
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        let px = (ndc.x + 1.0) * 0.5 * viewport.width;
        let py = (1.0 - ndc.y) * 0.5 * viewport.height;
        Some((px, py))
    }
}

/// Everything the surface needs to build itself once
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    pub camera: Camera,
    pub viewport: Viewport,
}

impl Environment {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            camera: Camera::perspective(viewport.aspect()),
            viewport,
        }
    }
}
