//! Time machinery: timestamp abstraction, frequencies and interval building

// Module structure
pub mod datetime;
pub mod frequency;
pub mod interval;

// Re-export public items from submodules
pub use self::datetime::{days_in_month, is_leap_year, Temporal};
pub use self::frequency::{Frequency, TimeUnit};
pub use self::interval::{event_intervals, uniform_intervals, Interval};
