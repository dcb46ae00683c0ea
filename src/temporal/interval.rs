//! Interval construction for uniform and event-driven windowing.

use chrono::{DateTime, Duration, Utc};

use crate::error::{Error, Result};
use crate::temporal::datetime::{add_months, Temporal};
use crate::temporal::frequency::{Frequency, TimeUnit};

/// A window interval with a start and end boundary
///
/// Boundary openness is decided by the windowing path, not stored here: a
/// uniform window treats intervals as `[start, end)` with the final one
/// closed at the data maximum, while an event window treats them as
/// `(start, end]` with everything at or before the first event going into
/// the first bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval<T> {
    /// Start boundary
    pub start: T,
    /// End boundary
    pub end: T,
}

impl<T> Interval<T> {
    /// Create a new interval
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }
}

/// Build consecutive uniform intervals covering `[min, max]`
///
/// Boundaries start at `min` and step by the frequency; the final interval
/// is clipped at `max`, so it may be shorter than the rest. Month and year
/// steps use calendar arithmetic with end-of-month clamping. A degenerate
/// single-instant range (`min == max`) yields one single-point interval.
///
/// Fails with `Error::EmptyRange` when `min > max` or when the frequency
/// resolves to a zero-width step.
pub fn uniform_intervals<T: Temporal>(
    min: &T,
    max: &T,
    freq: &Frequency,
) -> Result<Vec<Interval<T>>> {
    if min > max {
        return Err(Error::EmptyRange(
            "data range is empty (min_time > max_time)".to_string(),
        ));
    }

    let min_utc = min.to_utc();
    let max_utc = max.to_utc();

    match freq {
        Frequency::Every(count, unit) => {
            if *count == 0 {
                return Err(Error::EmptyRange(format!(
                    "period '{}' resolves to zero duration",
                    freq
                )));
            }
            let mut intervals = Vec::new();
            let mut cur = min_utc;
            while cur < max_utc {
                let next = step(cur, *count, *unit);
                if next >= max_utc {
                    intervals.push(Interval::new(T::from_utc(cur), max.clone()));
                    break;
                }
                intervals.push(Interval::new(T::from_utc(cur), T::from_utc(next)));
                cur = next;
            }
            if intervals.is_empty() {
                // min == max: a single-point range still gets one interval
                intervals.push(Interval::new(min.clone(), max.clone()));
            }
            Ok(intervals)
        }
        Frequency::Periods(n) => {
            if *n == 0 {
                return Err(Error::EmptyRange(
                    "interval count must be positive".to_string(),
                ));
            }
            if min_utc == max_utc {
                return Ok(vec![Interval::new(min.clone(), max.clone())]);
            }
            let total_us = max_utc
                .signed_duration_since(min_utc)
                .num_microseconds()
                .unwrap_or(i64::MAX);
            let mut intervals = Vec::with_capacity(*n);
            let mut prev = min.clone();
            for i in 1..=*n {
                let end = if i == *n {
                    // final boundary lands exactly on max
                    max.clone()
                } else {
                    let offset = total_us / *n as i64 * i as i64;
                    T::from_utc(min_utc + Duration::microseconds(offset))
                };
                intervals.push(Interval::new(prev, end.clone()));
                prev = end;
            }
            Ok(intervals)
        }
    }
}

/// Derive intervals from irregular event timestamps
///
/// Timestamps are deduplicated and sorted, then paired consecutively:
/// `[t1, t2, t2, t3]` yields `[(t1, t2), (t2, t3)]`. Fewer than two unique
/// timestamps yield no intervals.
pub fn event_intervals<T: Temporal>(timestamps: &[T]) -> Vec<Interval<T>> {
    let mut unique = timestamps.to_vec();
    unique.sort();
    unique.dedup();

    unique
        .windows(2)
        .map(|pair| Interval::new(pair[0].clone(), pair[1].clone()))
        .collect()
}

fn step(cur: DateTime<Utc>, count: u32, unit: TimeUnit) -> DateTime<Utc> {
    match unit {
        TimeUnit::Second => cur + Duration::seconds(count as i64),
        TimeUnit::Minute => cur + Duration::minutes(count as i64),
        TimeUnit::Hour => cur + Duration::hours(count as i64),
        TimeUnit::Day => cur + Duration::days(count as i64),
        TimeUnit::Month => add_months(cur, count),
        TimeUnit::Year => add_months(cur, count * 12),
    }
}
