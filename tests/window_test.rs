use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use tigertail::{Error, Frequency, Max, Mean, Min, Sum, TimeSeries, TimeUnit, WindowSpec, NA};

fn minute(m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, m, 0).unwrap()
}

fn series_0_to_5() -> TimeSeries<DateTime<Utc>> {
    // rows at minutes 0..=5 with values 1..=6
    TimeSeries::new(
        (0..=5).map(minute).collect(),
        (1..=6).map(|v| vec![v as f64]).collect(),
        vec!["v".to_string()],
        Arc::new(Sum),
    )
    .unwrap()
}

#[test]
fn two_minute_buckets_with_closed_final_interval() {
    let series = series_0_to_5();
    let spec = WindowSpec::Uniform(Frequency::Every(2, TimeUnit::Minute));
    let result = series.window(&spec, true).unwrap();

    // buckets [0,2), [2,4), [4,5]: sums 1+2, 3+4, 5+6, indexed by bucket end
    assert_eq!(result.index(), &[minute(2), minute(4), minute(5)]);
    assert_eq!(result.get(0, 0), Some(NA::Value(3.0)));
    assert_eq!(result.get(1, 0), Some(NA::Value(7.0)));
    assert_eq!(result.get(2, 0), Some(NA::Value(11.0)));
    assert_eq!(result.columns(), &["v".to_string()]);
}

#[test]
fn partitions_cover_every_row_exactly_once() {
    // summing a series of all-ones counts the rows per bucket
    let ones = TimeSeries::new(
        (0..=5).map(minute).collect(),
        vec![vec![1.0]; 6],
        vec!["n".to_string()],
        Arc::new(Sum),
    )
    .unwrap();

    for freq in ["1min", "2min", "3min", "1h"] {
        let spec = WindowSpec::Uniform(freq.parse::<Frequency>().unwrap());
        let result = ones.window(&spec, true).unwrap();
        let total: f64 = (0..result.len())
            .map(|row| result.get(row, 0).unwrap().value_or(0.0))
            .sum();
        assert_eq!(total, ones.len() as f64, "freq {}", freq);
    }
}

#[test]
fn empty_buckets_stay_missing_without_fill() {
    // rows only at minutes 0 and 5; 1min buckets in between are empty
    let series = TimeSeries::new(
        vec![minute(0), minute(5)],
        vec![vec![1.0], vec![1.0]],
        vec!["v".to_string()],
        Arc::new(Sum),
    )
    .unwrap();
    let spec = WindowSpec::Uniform(Frequency::Every(1, TimeUnit::Minute));

    let sparse = series.window(&spec, false).unwrap();
    assert_eq!(sparse.len(), 5);
    assert!(sparse.has_missing());
    assert_eq!(sparse.get(1, 0), Some(NA::NA));
    assert_eq!(sparse.get(2, 0), Some(NA::NA));

    let filled = series.window(&spec, true).unwrap();
    assert!(!filled.has_missing());
    assert_eq!(filled.get(1, 0), Some(NA::Value(0.0)));
}

#[test]
fn builtin_reducers_work_columnwise() {
    let series = TimeSeries::new(
        vec![minute(0), minute(1), minute(2)],
        vec![vec![1.0, 10.0], vec![2.0, 30.0], vec![3.0, 20.0]],
        vec!["a".to_string(), "b".to_string()],
        Arc::new(Sum),
    )
    .unwrap();
    let spec = WindowSpec::Uniform(Frequency::Every(1, TimeUnit::Hour));

    let mean = series.window_with(&spec, &Mean, true).unwrap();
    assert_eq!(mean.get(0, 0), Some(NA::Value(2.0)));
    assert_eq!(mean.get(0, 1), Some(NA::Value(20.0)));

    let min = series.window_with(&spec, &Min, true).unwrap();
    assert_eq!(min.get(0, 0), Some(NA::Value(1.0)));
    assert_eq!(min.get(0, 1), Some(NA::Value(10.0)));

    let max = series.window_with(&spec, &Max, true).unwrap();
    assert_eq!(max.get(0, 0), Some(NA::Value(3.0)));
    assert_eq!(max.get(0, 1), Some(NA::Value(30.0)));
}

#[test]
fn closure_reducers_are_accepted() {
    let series = series_0_to_5();
    let spec = WindowSpec::Uniform(Frequency::Every(2, TimeUnit::Minute));

    // count the rows per bucket
    let count = |rows: &[&[f64]]| vec![rows.len() as f64];
    let result = series.window_with(&spec, &count, true).unwrap();
    assert_eq!(result.get(0, 0), Some(NA::Value(2.0)));
    assert_eq!(result.get(2, 0), Some(NA::Value(2.0)));
}

#[test]
fn reducer_arity_is_checked() {
    let series = series_0_to_5();
    let spec = WindowSpec::Uniform(Frequency::Every(2, TimeUnit::Minute));

    let too_wide = |rows: &[&[f64]]| vec![rows.len() as f64, 0.0];
    let err = series.window_with(&spec, &too_wide, true).unwrap_err();
    assert!(matches!(
        err,
        Error::ReducerArity {
            expected: 1,
            found: 2
        }
    ));
}

#[test]
fn windowing_an_empty_series_fails() {
    let series = TimeSeries::<DateTime<Utc>>::new(
        Vec::new(),
        Vec::new(),
        vec!["v".to_string()],
        Arc::new(Sum),
    )
    .unwrap();
    let spec = WindowSpec::Uniform(Frequency::Every(1, TimeUnit::Minute));

    let err = series.window(&spec, true).unwrap_err();
    assert!(matches!(err, Error::EmptyRange(_)));
}

#[test]
fn constructor_rejects_ragged_rows() {
    let err = TimeSeries::new(
        vec![minute(0), minute(1)],
        vec![vec![1.0, 2.0], vec![3.0]],
        vec!["a".to_string(), "b".to_string()],
        Arc::new(Sum),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::InconsistentRowWidth {
            expected: 2,
            found: 1
        }
    ));

    let err = TimeSeries::new(
        vec![minute(0)],
        Vec::new(),
        vec!["a".to_string()],
        Arc::new(Sum),
    )
    .unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { .. }));
}

#[test]
fn result_exports_as_rows_and_json() {
    let series = series_0_to_5();
    let spec = WindowSpec::Uniform(Frequency::Every(2, TimeUnit::Minute));
    let result = series.window(&spec, true).unwrap();

    let rows = result.to_rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].0, minute(2));
    assert_eq!(rows[0].1, vec![Some(3.0)]);

    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["columns"], serde_json::json!(["v"]));
    assert_eq!(json["data"][1][0], serde_json::json!(7.0));
}
