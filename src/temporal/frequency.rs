//! Uniform window width specification and string parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Calendar unit for a uniform window width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Every second
    Second,
    /// Every minute
    Minute,
    /// Every hour
    Hour,
    /// Every day
    Day,
    /// Every month
    Month,
    /// Every year
    Year,
}

impl TimeUnit {
    fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "S" | "SEC" | "SECOND" | "SECONDS" => Some(TimeUnit::Second),
            "T" | "MIN" | "MINUTE" | "MINUTES" => Some(TimeUnit::Minute),
            "H" | "HOUR" | "HOURS" => Some(TimeUnit::Hour),
            "D" | "DAY" | "DAYS" => Some(TimeUnit::Day),
            "M" | "MO" | "MONTH" | "MONTHS" => Some(TimeUnit::Month),
            "Y" | "YR" | "YEAR" | "YEARS" | "A" => Some(TimeUnit::Year),
            _ => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Second => write!(f, "s"),
            TimeUnit::Minute => write!(f, "min"),
            TimeUnit::Hour => write!(f, "h"),
            TimeUnit::Day => write!(f, "d"),
            TimeUnit::Month => write!(f, "mo"),
            TimeUnit::Year => write!(f, "y"),
        }
    }
}

/// Width specification for uniform windowing
///
/// Either a fixed width (count and unit, e.g. 5 minutes) or an explicit
/// number of equal-duration intervals spanning the data range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    /// Fixed-width buckets, e.g. `Every(5, TimeUnit::Minute)`
    Every(u32, TimeUnit),
    /// Divide the data range into this many equal-duration buckets
    Periods(usize),
}

impl Frequency {
    /// Fixed width of one unit
    pub fn every(count: u32, unit: TimeUnit) -> Self {
        Frequency::Every(count, unit)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Every(count, unit) => write!(f, "{}{}", count, unit),
            Frequency::Periods(n) => write!(f, "{} periods", n),
        }
    }
}

impl FromStr for Frequency {
    type Err = Error;

    /// Parse a compact frequency alias such as `"5min"`, `"1h"`, `"2d"`,
    /// `"3mo"` or `"30s"`. A missing count means 1 (`"h"` is one hour).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();

        // Split into numeric prefix and unit suffix
        let mut num_chars = String::new();
        let mut unit_chars = String::new();
        for c in trimmed.chars() {
            if c.is_ascii_digit() && unit_chars.is_empty() {
                num_chars.push(c);
            } else {
                unit_chars.push(c);
            }
        }

        let count: u32 = if num_chars.is_empty() {
            1
        } else {
            num_chars
                .parse()
                .map_err(|_| Error::InvalidFrequency(s.to_string()))?
        };

        match TimeUnit::parse(unit_chars.trim()) {
            Some(unit) => Ok(Frequency::Every(count, unit)),
            None => Err(Error::InvalidFrequency(s.to_string())),
        }
    }
}
