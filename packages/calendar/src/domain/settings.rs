//! Rendering configuration for one `<stoic-calendar>` element.
//!
//! A `Settings` value is never mutated after construction. Attribute changes
//! build a fresh record with a bumped `version` and the visualizer swaps it in
//! whole.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKGROUND: Rgb = Rgb(0xf8f8ff);
pub const DEFAULT_DRAW: Rgb = Rgb(0x696969);
pub const DEFAULT_NUM_CIRCLES: u32 = 12;
pub const DEFAULT_CIRCLE_RADIUS: f32 = 0.2;
pub const DEFAULT_GROUP_RADIUS: f32 = 2.0;
pub const DEFAULT_SEGMENTS: u32 = 32;
/// 0.0005 rad per frame at 60 Hz
pub const DEFAULT_ANGULAR_VELOCITY: f64 = 0.03;

/// 24-bit `0xRRGGBB` color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    pub fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Rgb(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Parse the `r-g-b` attribute form, e.g. `105-105-105`.
    pub fn parse_dashed(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(format!("invalid color `{}` (expected r-g-b)", value.trim()));
        }
        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(parts.iter()) {
            *slot = part
                .trim()
                .parse::<u8>()
                .map_err(|e| format!("invalid color channel `{}`: {}", part.trim(), e))?;
        }
        Ok(Self::from_channels(channels[0], channels[1], channels[2]))
    }

    /// CSS hex form, `#rrggbb`
    pub fn to_css(&self) -> String {
        format!("#{:06x}", self.0 & 0xff_ffff)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimensionality {
    /// Ring lies in the view plane
    #[serde(rename = "2d")]
    TwoD,
    /// Ring is tilted away from the camera
    #[serde(rename = "3d")]
    ThreeD,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    #[serde(skip)]
    pub version: u64,
    pub birth_date: Option<NaiveDate>,
    pub background_color: Rgb,
    pub draw_color: Rgb,
    pub num_circles: u32,
    pub circle_radius: f32,
    pub group_radius: f32,
    pub segments: u32,
    pub dimensionality: Dimensionality,
    pub wireframe: bool,
    /// Radians per second
    pub angular_velocity: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: 0,
            birth_date: None,
            background_color: DEFAULT_BACKGROUND,
            draw_color: DEFAULT_DRAW,
            num_circles: DEFAULT_NUM_CIRCLES,
            circle_radius: DEFAULT_CIRCLE_RADIUS,
            group_radius: DEFAULT_GROUP_RADIUS,
            segments: DEFAULT_SEGMENTS,
            dimensionality: Dimensionality::TwoD,
            wireframe: false,
            angular_velocity: DEFAULT_ANGULAR_VELOCITY,
        }
    }
}

impl Settings {
    /// Parse a JSON override. Missing fields take defaults, unknown fields fail.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: Settings = serde_json::from_str(json).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.num_circles == 0 {
            return Err("num_circles must be at least 1".to_string());
        }
        if self.segments < 3 {
            return Err(format!("segments must be at least 3, got {}", self.segments));
        }
        for (name, value) in [("circle_radius", self.circle_radius), ("group_radius", self.group_radius)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be a positive number, got {}", name, value));
            }
        }
        if !self.angular_velocity.is_finite() {
            return Err("angular_velocity must be finite".to_string());
        }
        Ok(())
    }

    /// Distance from the ring center to each mark center
    pub fn orbit_radius(&self) -> f32 {
        self.circle_radius + self.group_radius
    }

    pub fn with_birth_date(&self, birth_date: Option<NaiveDate>) -> Self {
        Settings {
            version: self.version + 1,
            birth_date,
            ..self.clone()
        }
    }

    pub fn with_draw_color(&self, draw_color: Rgb) -> Self {
        Settings {
            version: self.version + 1,
            draw_color,
            ..self.clone()
        }
    }

    /// Replace every visual field from `next`, keeping the current birth date
    /// when `next` does not name one.
    pub fn replaced_by(&self, next: Settings) -> Self {
        Settings {
            version: self.version + 1,
            birth_date: next.birth_date.or(self.birth_date),
            ..next
        }
    }
}
