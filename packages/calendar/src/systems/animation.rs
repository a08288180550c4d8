//! Per-frame mark transforms.
//!
//! Every transform is an analytic function of (mark index, seconds since the
//! loop started, settings). Nothing is accumulated between frames, so a frame
//! can be rebuilt from scratch at any time with identical results.

use std::f64::consts::{PI, TAU};

use glam::{Mat4, Quat, Vec3};

use crate::domain::{Calendar, Dimensionality, Settings};

/// Tilt of the ring about the x axis in 3D mode
pub const THREE_D_TILT: f64 = PI / 3.0;

/// Floats per instance matrix
pub const MATRIX_STRIDE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Map a point from mark-local space into world space
    pub fn apply(&self, local: Vec3) -> Vec3 {
        self.rotation * (local * self.scale) + self.position
    }

    /// Column-major translate * rotate * scale
    pub fn to_matrix(&self) -> [f32; 16] {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position).to_cols_array()
    }
}

/// One instanced mark as handed to the surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mark {
    pub transform: Transform,
    /// The calendar slice this mark stands for has fully passed
    pub elapsed: bool,
}

/// Transform of mark `index` at `t` seconds.
pub fn mark_transform(index: u32, t: f64, settings: &Settings) -> Transform {
    let n = settings.num_circles.max(1) as f64;
    let spin = settings.angular_velocity * t;
    let angle = TAU * index as f64 / n + spin;
    let r = settings.orbit_radius() as f64;

    let flat = Vec3::new((angle.cos() * r) as f32, (angle.sin() * r) as f32, 0.0);
    let spin_q = Quat::from_rotation_z(spin as f32);

    match settings.dimensionality {
        Dimensionality::TwoD => Transform {
            position: flat,
            rotation: spin_q,
            scale: Vec3::ONE,
        },
        Dimensionality::ThreeD => {
            let tilt = Quat::from_rotation_x(-THREE_D_TILT as f32);
            Transform {
                position: tilt * flat,
                rotation: tilt * spin_q,
                scale: Vec3::ONE,
            }
        }
    }
}

/// Rebuild all marks for time `t` into `out`.
pub fn build_marks(settings: &Settings, calendar: &Calendar, t: f64, out: &mut Vec<Mark>) {
    let n = settings.num_circles;
    out.clear();
    out.reserve(n as usize);
    for i in 0..n {
        out.push(Mark {
            transform: mark_transform(i, t, settings),
            elapsed: calendar.slice_elapsed(i as usize, n as usize),
        });
    }
}

/// Pack mark transforms as consecutive column-major 4x4 matrices.
pub fn write_instance_matrices(marks: &[Mark], out: &mut Vec<f32>) {
    out.clear();
    out.reserve(marks.len() * MATRIX_STRIDE);
    for mark in marks {
        out.extend_from_slice(&mark.transform.to_matrix());
    }
}

/// Vertices of the regular polygon used to draw one mark, in mark-local space
pub fn mark_outline(settings: &Settings) -> Vec<Vec3> {
    let segments = settings.segments.max(3);
    let r = settings.circle_radius;
    (0..segments)
        .map(|k| {
            let theta = TAU * k as f64 / segments as f64;
            Vec3::new(theta.cos() as f32 * r, theta.sin() as f32 * r, 0.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn marks_start_evenly_spaced_on_the_orbit() {
        let s = Settings { num_circles: 4, ..Settings::default() };
        let r = s.orbit_radius();

        let t0 = mark_transform(0, 0.0, &s);
        assert!(close(t0.position.x, r));
        assert!(close(t0.position.y, 0.0));

        let t1 = mark_transform(1, 0.0, &s);
        assert!(close(t1.position.x, 0.0));
        assert!(close(t1.position.y, r));
        assert_eq!(t1.rotation, Quat::IDENTITY);
    }

    #[test]
    fn ring_advances_with_time() {
        let s = Settings { num_circles: 4, angular_velocity: std::f64::consts::FRAC_PI_2, ..Settings::default() };
        // one second = quarter turn, so mark 0 sits where mark 1 started
        let moved = mark_transform(0, 1.0, &s);
        let start = mark_transform(1, 0.0, &s);
        assert!(close(moved.position.x, start.position.x));
        assert!(close(moved.position.y, start.position.y));
        assert!(close(moved.rotation.z, (std::f64::consts::FRAC_PI_4).sin() as f32));
    }

    #[test]
    fn three_d_ring_has_depth() {
        let s = Settings { num_circles: 4, dimensionality: Dimensionality::ThreeD, ..Settings::default() };
        let top = mark_transform(1, 0.0, &s);
        assert!(top.position.z.abs() > 0.1);
        let length = top.position.length();
        assert!(close(length, s.orbit_radius()));
    }

    #[test]
    fn matrix_maps_points_like_apply() {
        let s = Settings { dimensionality: Dimensionality::ThreeD, ..Settings::default() };
        let transform = mark_transform(5, 2.0, &s);
        let local = Vec3::new(s.circle_radius, 0.0, 0.0);
        let by_matrix = Mat4::from_cols_array(&transform.to_matrix()).transform_point3(local);
        let by_apply = transform.apply(local);
        assert!(by_matrix.abs_diff_eq(by_apply, 1e-5));
    }

    #[test]
    fn outline_has_one_vertex_per_segment() {
        let s = Settings { segments: 6, ..Settings::default() };
        let outline = mark_outline(&s);
        assert_eq!(outline.len(), 6);
        assert!(close(outline[0].x, s.circle_radius));
    }

    #[test]
    fn instance_matrices_are_tightly_packed() {
        let s = Settings { num_circles: 3, ..Settings::default() };
        let cal = Calendar::with_elapsed(0);
        let mut marks = Vec::new();
        build_marks(&s, &cal, 0.5, &mut marks);
        let mut buf = Vec::new();
        write_instance_matrices(&marks, &mut buf);
        assert_eq!(buf.len(), 3 * MATRIX_STRIDE);
        assert_eq!(buf[MATRIX_STRIDE + 12], marks[1].transform.position.x);
    }
}
