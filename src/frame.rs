//! Named collections of series, windowed together into one aligned table.

use std::collections::HashMap;
use std::fmt;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::series::{EventSeries, TimeSeries};
use crate::table::ResultTable;
use crate::temporal::Temporal;
use crate::window::{WindowOptions, WindowSpec};

/// A frame member: either a plain time series or an event series
///
/// The distinction matters during event-driven windowing, where event
/// series pass through at their native resolution instead of being
/// re-windowed.
#[derive(Debug, Clone)]
pub enum Member<T: Temporal> {
    /// Regularly time-indexed data
    Series(TimeSeries<T>),
    /// Irregular event data
    Events(EventSeries<T>),
}

impl<T: Temporal> Member<T> {
    /// The member's column names
    pub fn columns(&self) -> &[String] {
        match self {
            Member::Series(series) => series.columns(),
            Member::Events(events) => events.columns(),
        }
    }

    fn window(&self, spec: &WindowSpec<'_, T>, fill_missing: bool) -> Result<ResultTable<T>> {
        match (spec, self) {
            (WindowSpec::EventDriven(events), Member::Series(series)) => {
                series.nonstationary_window(events, fill_missing)
            }
            // event members keep their native resolution under an
            // event-driven spec; the driver is never re-windowed against
            // itself
            (WindowSpec::EventDriven(_), Member::Events(events)) => Ok(events.to_table()),
            (WindowSpec::Uniform(_), Member::Series(series)) => series.window(spec, fill_missing),
            (WindowSpec::Uniform(_), Member::Events(events)) => events.window(spec, fill_missing),
        }
    }
}

impl<T: Temporal> From<TimeSeries<T>> for Member<T> {
    fn from(series: TimeSeries<T>) -> Self {
        Member::Series(series)
    }
}

impl<T: Temporal> From<EventSeries<T>> for Member<T> {
    fn from(events: EventSeries<T>) -> Self {
        Member::Events(events)
    }
}

/// Named, insertion-ordered collection of series
///
/// Windowing a frame windows every member and concatenates the per-member
/// results column-wise, aligned on the union of their time indices. Member
/// order determines output column order, so results are deterministic.
#[derive(Debug, Clone)]
pub struct TimeFrame<T: Temporal> {
    members: HashMap<String, Member<T>>,
    order: Vec<String>,
}

impl<T: Temporal> Default for TimeFrame<T> {
    fn default() -> Self {
        TimeFrame::new()
    }
}

impl<T: Temporal> TimeFrame<T> {
    /// Create an empty frame
    pub fn new() -> Self {
        TimeFrame {
            members: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Add a member under a unique name
    pub fn add(&mut self, name: impl Into<String>, member: impl Into<Member<T>>) -> Result<()> {
        let name = name.into();
        if self.members.contains_key(&name) {
            return Err(Error::DuplicateMember(name));
        }
        self.members.insert(name.clone(), member.into());
        self.order.push(name);
        Ok(())
    }

    /// Remove a member by name, returning it
    pub fn remove(&mut self, name: &str) -> Result<Member<T>> {
        match self.members.remove(name) {
            Some(member) => {
                self.order.retain(|n| n != name);
                Ok(member)
            }
            None => Err(Error::MemberNotFound(name.to_string())),
        }
    }

    /// Get a member by name
    pub fn get(&self, name: &str) -> Option<&Member<T>> {
        self.members.get(name)
    }

    /// Check for a member by name
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the frame has no members
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Member names in insertion order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Iterate members in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Member<T>)> {
        self.order
            .iter()
            .map(move |name| (name.as_str(), &self.members[name]))
    }

    /// Window every member and concatenate the results into one table
    ///
    /// Members are processed in insertion order. Under an event-driven spec,
    /// plain series get a nonstationary window and event members pass
    /// through raw; under a uniform spec every member is windowed by
    /// frequency. The per-member tables are aligned on the sorted union of
    /// their indices, with gaps filled per `fill_missing`, and the result
    /// columns are the members' own column names flattened in order. An
    /// empty frame yields an empty table.
    pub fn window(&self, spec: &WindowSpec<'_, T>, fill_missing: bool) -> Result<ResultTable<T>> {
        self.window_with_options(
            spec,
            &WindowOptions {
                fill_missing,
                ..WindowOptions::default()
            },
        )
    }

    /// Window with explicit options
    ///
    /// `namespace_columns` prefixes each output column with its member name,
    /// disambiguating members that share column names (plain `window` keeps
    /// the duplicate labels).
    pub fn window_with_options(
        &self,
        spec: &WindowSpec<'_, T>,
        options: &WindowOptions,
    ) -> Result<ResultTable<T>> {
        log::debug!("windowing frame of {} members", self.len());
        let tables = self
            .order
            .iter()
            .map(|name| self.member_table(name, spec, options))
            .collect::<Result<Vec<_>>>()?;
        ResultTable::concat(tables, options.fill_missing)
    }

    /// Window members in parallel, reassembling in insertion order
    ///
    /// Member windowing shares no mutable state, so the per-member results
    /// are computed on the rayon pool; output ordering is identical to
    /// [`window`](Self::window).
    pub fn par_window(
        &self,
        spec: &WindowSpec<'_, T>,
        fill_missing: bool,
    ) -> Result<ResultTable<T>>
    where
        T: Send + Sync,
    {
        let options = WindowOptions {
            fill_missing,
            ..WindowOptions::default()
        };
        let tables = self
            .order
            .par_iter()
            .map(|name| self.member_table(name, spec, &options))
            .collect::<Result<Vec<_>>>()?;
        ResultTable::concat(tables, fill_missing)
    }

    fn member_table(
        &self,
        name: &str,
        spec: &WindowSpec<'_, T>,
        options: &WindowOptions,
    ) -> Result<ResultTable<T>> {
        let mut table = self.members[name].window(spec, options.fill_missing)?;
        if options.namespace_columns {
            let labels = table
                .columns()
                .iter()
                .map(|col| format!("{}.{}", name, col))
                .collect();
            table.set_columns(labels)?;
        }
        Ok(table)
    }
}

impl<T: Temporal> fmt::Display for TimeFrame<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeFrame({} members:", self.len())?;
        for (i, name) in self.order.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            let kind = match self.members[name] {
                Member::Series(_) => "series",
                Member::Events(_) => "events",
            };
            write!(f, "{}{} [{}]", sep, name, kind)?;
        }
        write!(f, ")")
    }
}
