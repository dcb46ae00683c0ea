//! Window specifications and options.

use crate::series::EventSeries;
use crate::temporal::{Frequency, Temporal};

/// How to window: by a uniform frequency or by another series' events
///
/// This is the parameter every `window` operation takes; it selects which
/// interval-construction path runs.
#[derive(Debug, Clone)]
pub enum WindowSpec<'a, T: Temporal> {
    /// Fixed-width buckets spanning the data range
    Uniform(Frequency),
    /// Buckets derived from the referenced series' event timestamps
    EventDriven(&'a EventSeries<T>),
}

/// Options for frame-level windowing
#[derive(Debug, Clone)]
pub struct WindowOptions {
    /// Replace missing cells with zero in the result
    pub fill_missing: bool,
    /// Prefix result columns with their member name (`"member.column"`)
    ///
    /// Off by default: members sharing a column name then produce duplicate
    /// labels in the output, matching the historical behavior.
    pub namespace_columns: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        WindowOptions {
            fill_missing: true,
            namespace_columns: false,
        }
    }
}
