//! Domain model: birth dates, the week calendar, and rendering settings.

pub mod birth_date;
pub mod calendar;
pub mod settings;

pub use calendar::{Calendar, CALENDAR_LEN};
pub use settings::{Dimensionality, Rgb, Settings};
