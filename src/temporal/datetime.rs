//! Timestamp abstraction and calendar helpers.

use std::fmt::Debug;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Trait for timestamp types usable as a time index
///
/// Windowing only needs total ordering plus conversion to and from UTC so
/// that uniform interval boundaries can be computed with calendar arithmetic.
pub trait Temporal: Clone + Ord + Debug {
    /// Convert to a UTC datetime
    fn to_utc(&self) -> DateTime<Utc>;

    /// Convert back from a UTC datetime
    fn from_utc(dt: DateTime<Utc>) -> Self;
}

impl Temporal for DateTime<Utc> {
    fn to_utc(&self) -> DateTime<Utc> {
        *self
    }

    fn from_utc(dt: DateTime<Utc>) -> Self {
        dt
    }
}

// Naive datetimes are treated as already being in UTC
impl Temporal for NaiveDateTime {
    fn to_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_naive_utc_and_offset(*self, Utc)
    }

    fn from_utc(dt: DateTime<Utc>) -> Self {
        dt.naive_utc()
    }
}

/// Check if the given year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Get the number of days in the given month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Advance a datetime by a number of calendar months, clamping the day to the
/// last day of the target month (Jan 31 + 1 month = Feb 28/29)
pub(crate) fn add_months(dt: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let naive = dt.naive_utc();
    let total = naive.year() * 12 + naive.month() as i32 - 1 + months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = naive.day().min(days_in_month(year, month));

    let new_naive = NaiveDateTime::new(
        NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        naive.time(),
    );
    DateTime::<Utc>::from_naive_utc_and_offset(new_naive, Utc)
}
