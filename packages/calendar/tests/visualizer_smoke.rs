use chrono::{NaiveDate, NaiveDateTime};

use stoic_calendar::domain::settings::Dimensionality;
use stoic_calendar::render::Viewport;
use stoic_calendar::systems::animation::mark_transform;
use stoic_calendar::{HeadlessSurface, Settings, VisualizerCore};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn mark_transforms_are_pure() {
    for dimensionality in [Dimensionality::TwoD, Dimensionality::ThreeD] {
        let settings = Settings { dimensionality, ..Settings::default() };
        for i in 0..settings.num_circles {
            for t in [0.0, 0.016, 12.5, 86_400.0] {
                assert_eq!(mark_transform(i, t, &settings), mark_transform(i, t, &settings));
            }
        }
    }
}

#[test]
fn replaying_the_same_timestamps_yields_identical_frames() {
    let run = || {
        let mut core = VisualizerCore::new(HeadlessSurface::new());
        core.attribute_changed("birthdate", Some("1970-01-01"), now()).unwrap();
        core.connect(Viewport::new(640.0, 480.0)).unwrap();
        for i in 0..10 {
            core.tick(i as f64 * 16.6).unwrap();
        }
        core.surface().frames().to_vec()
    };
    assert_eq!(run(), run());
}

#[test]
fn end_to_end_new_year_2000() {
    let mut core = VisualizerCore::new(HeadlessSurface::new());
    core.attribute_changed("birthdate", Some("2000-01-01"), now()).unwrap();
    let calendar = core.calendar().expect("calendar derived");
    assert_eq!(calendar.elapsed_count(), 2);
    assert_eq!(&calendar.as_slice()[..3], &[true, true, false]);

    core.connect(Viewport::new(800.0, 600.0)).unwrap();
    assert!(core.tick(0.0).unwrap());
    let frame = core.surface().last_frame().unwrap();
    // two weeks of 4160 is far short of the first of twelve slices
    assert!(frame.marks.iter().all(|m| !m.elapsed));
}

#[test]
fn long_lives_fill_the_ring() {
    let mut core = VisualizerCore::new(HeadlessSurface::new());
    core.attribute_changed("birthdate", Some("1900-01-01"), now()).unwrap();
    core.connect(Viewport::new(800.0, 600.0)).unwrap();
    core.tick(0.0).unwrap();
    assert!(core.marks().iter().all(|m| m.elapsed));
}
