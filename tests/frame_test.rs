use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use tigertail::{
    Error, EventSeries, Frequency, Sum, TimeFrame, TimeSeries, TimeUnit, WindowOptions,
    WindowSpec, NA,
};

fn minute(m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, m, 0).unwrap()
}

fn series(timestamps: &[u32], values: &[f64], column: &str) -> TimeSeries<DateTime<Utc>> {
    TimeSeries::new(
        timestamps.iter().map(|&m| minute(m)).collect(),
        values.iter().map(|&v| vec![v]).collect(),
        vec![column.to_string()],
        Arc::new(Sum),
    )
    .unwrap()
}

#[test]
fn aligned_members_fill_each_others_gaps_with_zero() {
    // the two members cover disjoint time ranges; where one has data the
    // other must show zero, not a missing marker
    let mut frame = TimeFrame::new();
    frame.add("early", series(&[0, 1], &[1.0, 2.0], "a")).unwrap();
    frame.add("late", series(&[4, 5], &[4.0, 5.0], "b")).unwrap();

    let spec = WindowSpec::Uniform(Frequency::Every(2, TimeUnit::Minute));
    let result = frame.window(&spec, true).unwrap();

    assert_eq!(result.columns(), &["a".to_string(), "b".to_string()]);
    assert_eq!(result.index(), &[minute(1), minute(5)]);
    assert_eq!(result.get(0, 0), Some(NA::Value(3.0)));
    assert_eq!(result.get(0, 1), Some(NA::Value(0.0)));
    assert_eq!(result.get(1, 0), Some(NA::Value(0.0)));
    assert_eq!(result.get(1, 1), Some(NA::Value(9.0)));
    assert!(!result.has_missing());
}

#[test]
fn unfilled_gaps_stay_missing() {
    let mut frame = TimeFrame::new();
    frame.add("early", series(&[0, 1], &[1.0, 2.0], "a")).unwrap();
    frame.add("late", series(&[4, 5], &[4.0, 5.0], "b")).unwrap();

    let spec = WindowSpec::Uniform(Frequency::Every(2, TimeUnit::Minute));
    let result = frame.window(&spec, false).unwrap();

    assert!(result.has_missing());
    assert_eq!(result.get(0, 1), Some(NA::NA));
}

#[test]
fn column_order_follows_member_insertion_order() {
    let mut frame = TimeFrame::new();
    frame.add("z", series(&[0, 1], &[1.0, 2.0], "z1")).unwrap();
    frame.add("a", series(&[0, 1], &[3.0, 4.0], "a1")).unwrap();

    let spec = WindowSpec::Uniform(Frequency::Every(1, TimeUnit::Minute));
    let result = frame.window(&spec, true).unwrap();

    // insertion order, not alphabetical
    assert_eq!(result.columns(), &["z1".to_string(), "a1".to_string()]);
}

#[test]
fn event_driven_frame_windows_series_and_passes_events_through() {
    let mut frame = TimeFrame::new();
    frame
        .add("load", series(&[1, 2, 3, 4, 5, 6], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], "load"))
        .unwrap();

    let driver = EventSeries::new(
        vec![minute(2), minute(5)],
        vec![vec![1.0], vec![1.0]],
        vec!["deploy".to_string()],
        Arc::new(Sum),
    )
    .unwrap();
    frame.add("deploys", driver.clone()).unwrap();

    let spec = WindowSpec::EventDriven(&driver);
    let result = frame.window(&spec, true).unwrap();

    // the series is bucketed by the events; the event member passes through
    // at its native resolution
    assert_eq!(result.columns(), &["load".to_string(), "deploy".to_string()]);
    assert_eq!(result.index(), &[minute(2), minute(5)]);
    assert_eq!(result.get(0, 0), Some(NA::Value(3.0)));
    assert_eq!(result.get(1, 0), Some(NA::Value(12.0)));
    assert_eq!(result.get(0, 1), Some(NA::Value(1.0)));
    assert_eq!(result.get(1, 1), Some(NA::Value(1.0)));
}

#[test]
fn duplicate_column_names_are_preserved_by_default() {
    let mut frame = TimeFrame::new();
    frame.add("one", series(&[0, 1], &[1.0, 2.0], "x")).unwrap();
    frame.add("two", series(&[0, 1], &[3.0, 4.0], "x")).unwrap();

    let spec = WindowSpec::Uniform(Frequency::Every(1, TimeUnit::Minute));
    let result = frame.window(&spec, true).unwrap();
    assert_eq!(result.columns(), &["x".to_string(), "x".to_string()]);
}

#[test]
fn namespacing_disambiguates_shared_column_names() {
    let mut frame = TimeFrame::new();
    frame.add("one", series(&[0, 1], &[1.0, 2.0], "x")).unwrap();
    frame.add("two", series(&[0, 1], &[3.0, 4.0], "x")).unwrap();

    let spec = WindowSpec::Uniform(Frequency::Every(1, TimeUnit::Minute));
    let options = WindowOptions {
        fill_missing: true,
        namespace_columns: true,
    };
    let result = frame.window_with_options(&spec, &options).unwrap();
    assert_eq!(result.columns(), &["one.x".to_string(), "two.x".to_string()]);
}

#[test]
fn membership_is_a_mapping() {
    let mut frame = TimeFrame::new();
    assert!(frame.is_empty());

    frame.add("cpu", series(&[0], &[1.0], "cpu")).unwrap();
    assert_eq!(frame.len(), 1);
    assert!(frame.contains("cpu"));
    assert!(frame.get("cpu").is_some());
    assert_eq!(frame.names(), &["cpu".to_string()]);

    // duplicate names are rejected
    let err = frame.add("cpu", series(&[0], &[2.0], "cpu")).unwrap_err();
    assert!(matches!(err, Error::DuplicateMember(_)));

    // removal returns the member and forgets the name
    assert!(frame.remove("cpu").is_ok());
    assert!(frame.is_empty());
    let err = frame.remove("cpu").unwrap_err();
    assert!(matches!(err, Error::MemberNotFound(_)));
}

#[test]
fn empty_frame_windows_to_an_empty_table() {
    let frame = TimeFrame::<DateTime<Utc>>::new();
    let spec = WindowSpec::Uniform(Frequency::Every(1, TimeUnit::Minute));

    let result = frame.window(&spec, true).unwrap();
    assert!(result.is_empty());
    assert!(result.columns().is_empty());
}

#[test]
fn duplicate_passthrough_timestamps_fail_alignment() {
    // an event member with duplicate raw timestamps cannot be aligned
    let mut frame = TimeFrame::new();
    let driver = EventSeries::new(
        vec![minute(2), minute(2), minute(5)],
        vec![vec![1.0], vec![2.0], vec![3.0]],
        vec!["hit".to_string()],
        Arc::new(Sum),
    )
    .unwrap();
    frame.add("hits", driver.clone()).unwrap();
    frame
        .add("load", series(&[1, 3], &[1.0, 2.0], "load"))
        .unwrap();

    let spec = WindowSpec::EventDriven(&driver);
    let err = frame.window(&spec, true).unwrap_err();
    assert!(matches!(err, Error::Alignment(_)));
}

#[test]
fn par_window_matches_sequential_output() {
    let mut frame = TimeFrame::new();
    frame.add("a", series(&[0, 1, 2, 3], &[1.0, 2.0, 3.0, 4.0], "a")).unwrap();
    frame.add("b", series(&[2, 3, 4, 5], &[5.0, 6.0, 7.0, 8.0], "b")).unwrap();
    frame.add("c", series(&[0, 5], &[9.0, 10.0], "c")).unwrap();

    let spec = WindowSpec::Uniform(Frequency::Every(2, TimeUnit::Minute));
    let sequential = frame.window(&spec, true).unwrap();
    let parallel = frame.par_window(&spec, true).unwrap();

    assert_eq!(sequential.columns(), parallel.columns());
    assert_eq!(sequential.index(), parallel.index());
    for row in 0..sequential.len() {
        for col in 0..sequential.columns().len() {
            assert_eq!(sequential.get(row, col), parallel.get(row, col));
        }
    }
}
