use chrono::NaiveDateTime;

use crate::domain::birth_date::parse_birth_date;
use crate::domain::settings::{Rgb, Settings, DEFAULT_DRAW};
use crate::render::RenderSurface;

use super::VisualizerCore;

/// Attribute names the element observes, in canonical (lowercase) form
pub const OBSERVED_ATTRIBUTES: [&str; 3] = ["birthdate", "color", "settings"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeName {
    BirthDate,
    Color,
    Settings,
}

impl AttributeName {
    /// Case-insensitive; `birthDate` and `birthdate` are the same attribute.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "birthdate" => Some(AttributeName::BirthDate),
            "color" => Some(AttributeName::Color),
            "settings" => Some(AttributeName::Settings),
            _ => None,
        }
    }
}

pub(super) fn attribute_changed<S: RenderSurface>(
    core: &mut VisualizerCore<S>,
    name: &str,
    value: Option<&str>,
    now: NaiveDateTime,
) -> Result<bool, String> {
    let Some(attr) = AttributeName::parse(name) else {
        log::debug!("ignoring unobserved attribute `{}`", name);
        return Ok(false);
    };

    let next = match attr {
        AttributeName::BirthDate => birth_date_settings(&core.settings, value),
        AttributeName::Color => match color_settings(&core.settings, value) {
            Some(next) => next,
            None => return Ok(false),
        },
        AttributeName::Settings => json_settings(&core.settings, value)?,
    };
    core.replace_settings(next, now);
    Ok(true)
}

fn birth_date_settings(current: &Settings, value: Option<&str>) -> Settings {
    let birth_date = match value.map(parse_birth_date) {
        Some(Ok(date)) => Some(date),
        Some(Err(e)) => {
            log::warn!("clearing calendar: {}", e);
            None
        }
        None => None,
    };
    current.with_birth_date(birth_date)
}

fn color_settings(current: &Settings, value: Option<&str>) -> Option<Settings> {
    match value {
        None => Some(current.with_draw_color(DEFAULT_DRAW)),
        Some(raw) => match Rgb::parse_dashed(raw) {
            Ok(color) => Some(current.with_draw_color(color)),
            Err(e) => {
                log::warn!("keeping draw color {}: {}", current.draw_color, e);
                None
            }
        },
    }
}

fn json_settings(current: &Settings, value: Option<&str>) -> Result<Settings, String> {
    let next = match value {
        Some(json) if !json.trim().is_empty() => Settings::from_json(json)?,
        _ => Settings::default(),
    };
    Ok(current.replaced_by(next))
}
