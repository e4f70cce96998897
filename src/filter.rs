//! Time-of-day filtering of the trip log.
//!
//! The filter value is either "no filter" or a minute of the day; a trip
//! matches when its start or end falls within an hour of the selected
//! minute. Filtering always reads the full trip log, so repeated filter
//! changes never accumulate.

use crate::traffic::Trip;
use anyhow::{Context, bail};
use chrono::{NaiveDateTime, Timelike};
use std::borrow::Cow;

/// Half-width of the match window around the selected minute.
pub const WINDOW_MINUTES: u32 = 60;

/// Raw slider value meaning "no filter".
pub const NO_FILTER: i32 = -1;

const MINUTES_PER_DAY: u32 = 1440;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    /// Every trip counts.
    All,
    /// Only trips starting or ending within [`WINDOW_MINUTES`] of this
    /// minute of the day.
    At(u32),
}

impl TimeFilter {
    /// Maps a raw slider value (`-1` or `0..=1439`) to a filter.
    pub fn from_raw(value: i32) -> anyhow::Result<Self> {
        if value == NO_FILTER {
            return Ok(TimeFilter::All);
        }
        if (0..MINUTES_PER_DAY as i32).contains(&value) {
            return Ok(TimeFilter::At(value as u32));
        }
        bail!("time filter {value} out of range (-1 or 0..=1439)");
    }

    /// Parses CLI input: `-1`, a bare minute count, or `HH:MM`.
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        if let Some((hours, minutes)) = input.split_once(':') {
            let hours: u32 = hours
                .parse()
                .with_context(|| format!("bad hour in time filter {input:?}"))?;
            let minutes: u32 = minutes
                .parse()
                .with_context(|| format!("bad minute in time filter {input:?}"))?;
            if hours > 23 || minutes > 59 {
                bail!("time filter {input:?} is not a valid HH:MM time");
            }
            return Ok(TimeFilter::At(hours * 60 + minutes));
        }

        let raw: i32 = input
            .parse()
            .with_context(|| format!("time filter {input:?} is neither HH:MM nor a minute count"))?;
        Self::from_raw(raw)
    }
}

/// Minutes since local midnight, `0..=1439`. The date portion is ignored.
pub fn minutes_since_midnight(ts: NaiveDateTime) -> u32 {
    ts.hour() * 60 + ts.minute()
}

/// Selects the trips inside the filter window.
///
/// `All` hands back the input slice untouched. `At(m)` keeps the trips whose
/// start or end minute is within [`WINDOW_MINUTES`] of `m` by absolute
/// difference, preserving input order. The window does not wrap across
/// midnight: a 23:50 start is 1420 minutes from a 00:10 filter, not 20.
pub fn filter_trips_by_time(trips: &[Trip], filter: TimeFilter) -> Cow<'_, [Trip]> {
    match filter {
        TimeFilter::All => Cow::Borrowed(trips),
        TimeFilter::At(minute) => Cow::Owned(
            trips
                .iter()
                .filter(|trip| trip_matches(trip, minute))
                .cloned()
                .collect(),
        ),
    }
}

fn trip_matches(trip: &Trip, minute: u32) -> bool {
    minutes_since_midnight(trip.started_at).abs_diff(minute) <= WINDOW_MINUTES
        || minutes_since_midnight(trip.ended_at).abs_diff(minute) <= WINDOW_MINUTES
}
