//! TigerTail: windowing and aggregation for time-indexed data
//!
//! The crate windows time-indexed numeric data either by uniform time
//! intervals or by irregular event timestamps, and combines multiple
//! windowed series into one column-aligned table:
//!
//! - [`TimeSeries`] - time-indexed numeric rows with a default reducer
//! - [`EventSeries`] - irregular event timestamps deriving nonstationary
//!   window intervals
//! - [`TimeFrame`] - a named collection of both, windowed together
//! - [`ResultTable`] - the aligned tabular result, with explicit missing
//!   cells and a zero-fill policy
//!
//! Parsing input data and printing results belong to callers; the crate
//! consumes already-parsed rows and exports plain tables.

// Core data structures
pub mod error;
pub mod na;
pub mod table;

// Time machinery and aggregation
pub mod reduce;
pub mod temporal;

// Windowing engine
pub mod frame;
pub mod series;
pub mod window;

// Re-export the public surface at the crate root
pub use error::{Error, Result};
pub use frame::{Member, TimeFrame};
pub use na::NA;
pub use reduce::{Max, Mean, Min, Reducer, Sum};
pub use series::{EventSeries, TimeSeries};
pub use table::ResultTable;
pub use temporal::{Frequency, Interval, Temporal, TimeUnit};
pub use window::{WindowOptions, WindowSpec};
