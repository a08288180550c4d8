use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

pub const MS_PER_WEEK: i64 = 1000 * 60 * 60 * 24 * 7;

/// Parse a `yyyy-mm-dd` birth date attribute.
pub fn parse_birth_date(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("birth date is empty".to_string());
    }
    NaiveDate::parse_from_str(trimmed, BIRTH_DATE_FORMAT)
        .map_err(|e| format!("invalid birth date `{}` (expected yyyy-mm-dd): {}", trimmed, e))
}

/// Whole weeks between local midnight of `birth` and `now`.
///
/// Truncates toward zero, so a birth date in the future yields zero or a
/// negative count.
pub fn elapsed_weeks(birth: NaiveDate, now: NaiveDateTime) -> i64 {
    let start = birth.and_time(NaiveTime::MIN);
    (now - start).num_milliseconds() / MS_PER_WEEK
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_iso_dates_with_whitespace() {
        assert_eq!(parse_birth_date(" 1990-07-04 "), Ok(date(1990, 7, 4)));
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert!(parse_birth_date("").is_err());
        assert!(parse_birth_date("yesterday").is_err());
        assert!(parse_birth_date("2001-02-30").is_err());
        assert!(parse_birth_date("2001/02/03").is_err());
    }

    #[test]
    fn partial_week_does_not_count() {
        let now = date(2000, 1, 7).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(elapsed_weeks(date(2000, 1, 1), now), 0);

        let now = date(2000, 1, 8).and_time(NaiveTime::MIN);
        assert_eq!(elapsed_weeks(date(2000, 1, 1), now), 1);
    }

    #[test]
    fn future_birth_is_negative() {
        let now = date(2000, 1, 1).and_time(NaiveTime::MIN);
        assert_eq!(elapsed_weeks(date(2000, 1, 15), now), -2);
    }
}
