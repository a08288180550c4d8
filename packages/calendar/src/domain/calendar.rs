use chrono::{NaiveDate, NaiveDateTime};

use super::birth_date::{elapsed_weeks, parse_birth_date};

pub const WEEKS_PER_YEAR: usize = 52;
pub const LIFE_EXPECTANCY_YEARS: usize = 80;
pub const CALENDAR_LEN: usize = WEEKS_PER_YEAR * LIFE_EXPECTANCY_YEARS;

/// One cell per week of an 80-year life; `true` means the week has passed.
///
/// The length never changes. Only the boundary between elapsed and remaining
/// cells moves, and it is recomputed from scratch rather than advanced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calendar {
    cells: Vec<bool>,
    elapsed: usize,
}

impl Calendar {
    /// Fill the first `elapsed_weeks(birth, now)` cells, clamped to `[0, CALENDAR_LEN]`.
    pub fn derive(birth: NaiveDate, now: NaiveDateTime) -> Self {
        Self::with_elapsed(elapsed_weeks(birth, now))
    }

    /// `None` when the attribute is missing or unparseable; nothing is rendered then.
    pub fn from_attribute(value: Option<&str>, now: NaiveDateTime) -> Option<Self> {
        let raw = value?;
        match parse_birth_date(raw) {
            Ok(birth) => Some(Self::derive(birth, now)),
            Err(e) => {
                log::warn!("skipping calendar: {}", e);
                None
            }
        }
    }

    pub(crate) fn with_elapsed(weeks: i64) -> Self {
        let elapsed = weeks.clamp(0, CALENDAR_LEN as i64) as usize;
        let mut cells = vec![false; CALENDAR_LEN];
        cells[..elapsed].fill(true);
        Self { cells, elapsed }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn elapsed_count(&self) -> usize {
        self.elapsed
    }

    pub fn remaining_count(&self) -> usize {
        self.cells.len() - self.elapsed
    }

    pub fn is_elapsed(&self, week: usize) -> bool {
        self.cells.get(week).copied().unwrap_or(false)
    }

    /// Fraction of the calendar already lived, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        self.elapsed as f64 / self.cells.len() as f64
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Cells as bytes (1 = elapsed) for handing to JS.
    pub fn cells(&self) -> Vec<u8> {
        self.cells.iter().map(|&c| c as u8).collect()
    }

    /// Whether every week in slice `mark` of `marks` equal slices has passed.
    pub fn slice_elapsed(&self, mark: usize, marks: usize) -> bool {
        if marks == 0 || mark >= marks {
            return false;
        }
        // elapsed / len >= (mark + 1) / marks, kept in integers
        self.elapsed * marks >= (mark + 1) * self.cells.len()
    }
}
