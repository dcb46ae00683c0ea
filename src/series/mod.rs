//! Series module - time-indexed numeric tables and their windowing
//!
//! A [`TimeSeries`] holds rows of numeric values keyed by ascending
//! timestamps, and can be windowed either by a uniform frequency or by the
//! timestamps of an [`EventSeries`].

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::na::NA;
use crate::reduce::Reducer;
use crate::table::ResultTable;
use crate::temporal::{uniform_intervals, Frequency, Temporal};
use crate::window::WindowSpec;

pub mod event;

pub use event::EventSeries;

/// Time-indexed table of numeric columns with a default reducer
///
/// Rows are `(timestamp, values)` pairs stored as parallel vectors, sorted
/// ascending by timestamp. Ordering is the caller's responsibility; the
/// engine assumes it for partition assignment and never re-sorts or mutates
/// the data.
#[derive(Clone)]
pub struct TimeSeries<T: Temporal> {
    timestamps: Vec<T>,
    values: Vec<Vec<f64>>,
    columns: Vec<String>,
    reducer: Arc<dyn Reducer>,
}

impl<T: Temporal> TimeSeries<T> {
    /// Create a new TimeSeries
    ///
    /// # Arguments
    /// * `timestamps` - Row timestamps, ascending
    /// * `values` - One numeric row per timestamp
    /// * `columns` - Column names; every row must have exactly this many cells
    /// * `reducer` - Default aggregation applied when windowing
    pub fn new(
        timestamps: Vec<T>,
        values: Vec<Vec<f64>>,
        columns: Vec<String>,
        reducer: Arc<dyn Reducer>,
    ) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(Error::LengthMismatch {
                expected: timestamps.len(),
                actual: values.len(),
            });
        }
        for row in &values {
            if row.len() != columns.len() {
                return Err(Error::InconsistentRowWidth {
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(TimeSeries {
            timestamps,
            values,
            columns,
            reducer,
        })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series has no rows
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Row timestamps
    pub fn timestamps(&self) -> &[T] {
        &self.timestamps
    }

    /// Numeric rows, parallel to the timestamps
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Replace the default reducer (builder pattern)
    pub fn with_reducer(mut self, reducer: Arc<dyn Reducer>) -> Self {
        self.reducer = reducer;
        self
    }

    /// First and last timestamp, when any rows exist
    pub fn time_range(&self) -> Option<(&T, &T)> {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    /// Window the series with its default reducer
    ///
    /// Dispatches on the spec: uniform frequencies bucket by fixed-width
    /// intervals, an event-driven spec delegates to
    /// [`nonstationary_window`](Self::nonstationary_window).
    pub fn window(&self, spec: &WindowSpec<'_, T>, fill_missing: bool) -> Result<ResultTable<T>> {
        self.window_with(spec, self.reducer.as_ref(), fill_missing)
    }

    /// Window the series with a one-off reducer instead of the default
    pub fn window_with(
        &self,
        spec: &WindowSpec<'_, T>,
        reducer: &dyn Reducer,
        fill_missing: bool,
    ) -> Result<ResultTable<T>> {
        match spec {
            WindowSpec::Uniform(freq) => self.window_uniform(freq, reducer, fill_missing),
            WindowSpec::EventDriven(events) => {
                self.window_by_event_times(&events.event_times(), reducer, fill_missing)
            }
        }
    }

    /// Window the series by the intervals between another series' events
    ///
    /// The first bucket takes every row at or before the first event, each
    /// following bucket takes rows in `(prev_event, event]`, and rows after
    /// the last event are dropped. Every bucket is indexed by its event
    /// timestamp. A single unique event yields exactly one bucket.
    pub fn nonstationary_window(
        &self,
        events: &EventSeries<T>,
        fill_missing: bool,
    ) -> Result<ResultTable<T>> {
        self.window_by_event_times(&events.event_times(), self.reducer.as_ref(), fill_missing)
    }

    fn window_uniform(
        &self,
        freq: &Frequency,
        reducer: &dyn Reducer,
        fill_missing: bool,
    ) -> Result<ResultTable<T>> {
        let (min, max) = self
            .time_range()
            .ok_or_else(|| Error::EmptyRange("cannot window a series with no rows".to_string()))?;
        let intervals = uniform_intervals(min, max, freq)?;
        log::debug!(
            "uniform window: {} rows into {} intervals of {}",
            self.len(),
            intervals.len(),
            freq
        );

        let mut index = Vec::with_capacity(intervals.len());
        let mut cells = Vec::with_capacity(intervals.len());
        let last = intervals.len() - 1;
        let mut row = 0;
        for (k, interval) in intervals.iter().enumerate() {
            let from = row;
            while row < self.len() {
                let ts = &self.timestamps[row];
                // buckets are [start, end), except the final one which is
                // closed at the data maximum
                let inside = if k == last {
                    ts <= &interval.end
                } else {
                    ts < &interval.end
                };
                if !inside {
                    break;
                }
                row += 1;
            }
            index.push(interval.end.clone());
            cells.push(self.reduce_range(from..row, reducer, fill_missing)?);
        }

        Ok(ResultTable::from_parts(index, self.columns.clone(), cells))
    }

    pub(crate) fn window_by_event_times(
        &self,
        events: &[T],
        reducer: &dyn Reducer,
        fill_missing: bool,
    ) -> Result<ResultTable<T>> {
        if events.is_empty() {
            return Err(Error::EmptyRange(
                "event series has no timestamps to window by".to_string(),
            ));
        }
        log::debug!(
            "event window: {} rows into {} buckets",
            self.len(),
            events.len()
        );

        let mut index = Vec::with_capacity(events.len());
        let mut cells = Vec::with_capacity(events.len());
        let mut row = 0;
        for event in events {
            let from = row;
            while row < self.len() && &self.timestamps[row] <= event {
                row += 1;
            }
            index.push(event.clone());
            cells.push(self.reduce_range(from..row, reducer, fill_missing)?);
        }
        // rows after the last event stay unassigned

        Ok(ResultTable::from_parts(index, self.columns.clone(), cells))
    }

    fn reduce_range(
        &self,
        rows: std::ops::Range<usize>,
        reducer: &dyn Reducer,
        fill_missing: bool,
    ) -> Result<Vec<NA<f64>>> {
        if rows.is_empty() {
            // the reducer is undefined on empty input; the bucket is missing
            let absent = if fill_missing { NA::Value(0.0) } else { NA::NA };
            return Ok(vec![absent; self.columns.len()]);
        }
        let slices: Vec<&[f64]> = self.values[rows].iter().map(|row| row.as_slice()).collect();
        let reduced = reducer.reduce(&slices);
        if reduced.len() != self.columns.len() {
            return Err(Error::ReducerArity {
                expected: self.columns.len(),
                found: reduced.len(),
            });
        }
        Ok(reduced.into_iter().map(NA::Value).collect())
    }
}

impl<T: Temporal> fmt::Debug for TimeSeries<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeSeries")
            .field("rows", &self.len())
            .field("columns", &self.columns)
            .finish()
    }
}
