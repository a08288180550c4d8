use chrono::{Duration, NaiveDate, NaiveDateTime};

use stoic_calendar::domain::birth_date::elapsed_weeks;
use stoic_calendar::domain::calendar::{Calendar, CALENDAR_LEN, LIFE_EXPECTANCY_YEARS, WEEKS_PER_YEAR};

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn assert_prefix_filled(cal: &Calendar, n: usize) {
    assert_eq!(cal.len(), CALENDAR_LEN);
    assert_eq!(cal.elapsed_count(), n);
    let cells = cal.as_slice();
    assert!(cells[..n].iter().all(|&c| c), "first {} cells should be elapsed", n);
    assert!(cells[n..].iter().all(|&c| !c), "cells from {} on should be remaining", n);
}

#[test]
fn calendar_shape_is_fixed() {
    assert_eq!(CALENDAR_LEN, WEEKS_PER_YEAR * LIFE_EXPECTANCY_YEARS);
    assert_eq!(CALENDAR_LEN, 4160);
}

#[test]
fn exactly_n_weeks_fills_exactly_n_cells() {
    let now = midnight(2024, 6, 1);
    for n in [0usize, 1, 2, 51, 52, 1000, 4159, 4160] {
        let birth = (now - Duration::weeks(n as i64)).date();
        let cal = Calendar::derive(birth, now);
        assert_prefix_filled(&cal, n);
    }
}

#[test]
fn future_birth_date_is_all_remaining() {
    let now = midnight(2024, 6, 1);
    let cal = Calendar::derive(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(), now);
    assert_prefix_filled(&cal, 0);
    assert_eq!(cal.progress(), 0.0);
}

#[test]
fn birth_beyond_horizon_is_all_elapsed() {
    let now = midnight(2024, 6, 1);
    let birth = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
    assert!(elapsed_weeks(birth, now) > CALENDAR_LEN as i64);
    let cal = Calendar::derive(birth, now);
    assert_prefix_filled(&cal, CALENDAR_LEN);
    assert_eq!(cal.remaining_count(), 0);
    assert_eq!(cal.progress(), 1.0);
}

#[test]
fn two_weeks_after_new_year_2000() {
    let now = midnight(2000, 1, 15);
    let cal = Calendar::from_attribute(Some("2000-01-01"), now).expect("valid birth date");
    assert_eq!(cal.elapsed_count(), 2);
    assert!(cal.is_elapsed(0));
    assert!(cal.is_elapsed(1));
    assert!(!cal.is_elapsed(2));
    assert_prefix_filled(&cal, 2);
}

#[test]
fn missing_or_malformed_attribute_yields_no_calendar() {
    let now = midnight(2000, 1, 15);
    assert!(Calendar::from_attribute(None, now).is_none());
    assert!(Calendar::from_attribute(Some(""), now).is_none());
    assert!(Calendar::from_attribute(Some("01/01/2000"), now).is_none());
    assert!(Calendar::from_attribute(Some("2000-13-01"), now).is_none());
}

#[test]
fn boundary_only_moves_forward() {
    let birth = NaiveDate::from_ymd_opt(1990, 3, 14).unwrap();
    let mut previous = 0;
    for day in 0..60 {
        let now = midnight(2020, 1, 1) + Duration::days(day);
        let count = Calendar::derive(birth, now).elapsed_count();
        assert!(count >= previous);
        previous = count;
    }
}
