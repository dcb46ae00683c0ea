//! Event series: irregular timestamps that drive nonstationary windows.

use std::sync::Arc;
use std::sync::OnceLock;

use crate::error::Result;
use crate::na::NA;
use crate::reduce::{Reducer, Sum};
use crate::series::TimeSeries;
use crate::table::ResultTable;
use crate::temporal::{event_intervals, Interval, Temporal};
use crate::window::WindowSpec;

/// Series of irregular event timestamps, optionally carrying attribute
/// columns
///
/// Besides behaving like a [`TimeSeries`] over its attributes, an event
/// series derives the intervals between its consecutive unique timestamps.
/// Those intervals drive nonstationary windowing of other series. The
/// derived list is computed lazily and cached; the series is otherwise
/// immutable, so the cache only needs explicit invalidation via
/// [`recompute_intervals`](Self::recompute_intervals).
#[derive(Debug, Clone)]
pub struct EventSeries<T: Temporal> {
    data: TimeSeries<T>,
    intervals: OnceLock<Vec<Interval<T>>>,
}

impl<T: Temporal> EventSeries<T> {
    /// Create a new EventSeries with attribute columns
    pub fn new(
        timestamps: Vec<T>,
        values: Vec<Vec<f64>>,
        columns: Vec<String>,
        reducer: Arc<dyn Reducer>,
    ) -> Result<Self> {
        Ok(EventSeries {
            data: TimeSeries::new(timestamps, values, columns, reducer)?,
            intervals: OnceLock::new(),
        })
    }

    /// Create an EventSeries from bare timestamps, with no attribute columns
    pub fn from_timestamps(timestamps: Vec<T>) -> Self {
        let rows = vec![Vec::new(); timestamps.len()];
        EventSeries {
            // cannot fail: every row is as wide as the empty column list
            data: TimeSeries::new(timestamps, rows, Vec::new(), Arc::new(Sum))
                .expect("empty rows always match empty columns"),
            intervals: OnceLock::new(),
        }
    }

    /// The underlying time-indexed attribute data
    pub fn data(&self) -> &TimeSeries<T> {
        &self.data
    }

    /// Number of events (rows)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the series has no events
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Attribute column names
    pub fn columns(&self) -> &[String] {
        self.data.columns()
    }

    /// Unique event timestamps, sorted ascending
    pub fn event_times(&self) -> Vec<T> {
        let mut times = self.data.timestamps().to_vec();
        times.sort();
        times.dedup();
        times
    }

    /// Intervals between consecutive unique event timestamps
    ///
    /// Computed on first use and cached. `n` unique timestamps yield
    /// `n - 1` intervals; zero or one yield none.
    pub fn intervals(&self) -> &[Interval<T>] {
        self.intervals
            .get_or_init(|| event_intervals(self.data.timestamps()))
    }

    /// Drop the cached intervals so the next access recomputes them
    pub fn recompute_intervals(&mut self) {
        self.intervals.take();
    }

    /// Window the attribute data with the default reducer, exactly like
    /// [`TimeSeries::window`]
    pub fn window(&self, spec: &WindowSpec<'_, T>, fill_missing: bool) -> Result<ResultTable<T>> {
        self.data.window(spec, fill_missing)
    }

    /// Window this series' attribute data by another event series' timestamps
    pub fn window_by_events(
        &self,
        events: &EventSeries<T>,
        fill_missing: bool,
    ) -> Result<ResultTable<T>> {
        self.data.nonstationary_window(events, fill_missing)
    }

    /// The raw attribute data as a table, unwindowed
    ///
    /// Used when this series drives an event-driven frame window: the driver
    /// keeps its native resolution instead of being re-windowed against
    /// itself.
    pub fn to_table(&self) -> ResultTable<T> {
        let cells = self
            .data
            .values()
            .iter()
            .map(|row| row.iter().copied().map(NA::Value).collect())
            .collect();
        ResultTable::from_parts(
            self.data.timestamps().to_vec(),
            self.data.columns().to_vec(),
            cells,
        )
    }
}
