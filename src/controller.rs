//! Filter state and recompute orchestration.
//!
//! [`TrafficController`] owns the canonical station list and the full trip
//! log, holds the latest summaries separately, and re-derives them from
//! scratch on every filter change.

use crate::filter::{TimeFilter, filter_trips_by_time};
use crate::scales::{FILTERED_RADIUS_RANGE, FlowScale, RadiusScale, UNFILTERED_RADIUS_RANGE};
use crate::traffic::{Station, StationTraffic, Trip, compute_station_traffic};
use tracing::debug;

pub struct TrafficController {
    stations: Vec<Station>,
    trips: Vec<Trip>,
    filter: TimeFilter,
    summaries: Vec<StationTraffic>,
}

impl TrafficController {
    /// Builds the controller and the unfiltered baseline summaries.
    pub fn new(stations: Vec<Station>, trips: Vec<Trip>) -> Self {
        let summaries = compute_station_traffic(&stations, &trips);
        Self {
            stations,
            trips,
            filter: TimeFilter::All,
            summaries,
        }
    }

    /// Applies a filter and recomputes every summary.
    ///
    /// Each call re-filters the complete trip log, so repeated calls with
    /// the same value give identical summaries and switching back to
    /// [`TimeFilter::All`] restores the baseline exactly.
    pub fn set_filter(&mut self, filter: TimeFilter) -> &[StationTraffic] {
        self.filter = filter;

        let filtered = filter_trips_by_time(&self.trips, filter);
        self.summaries = compute_station_traffic(&self.stations, &filtered);

        debug!(
            ?filter,
            matched = filtered.len(),
            of = self.trips.len(),
            "Recomputed station traffic"
        );

        &self.summaries
    }

    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn summaries(&self) -> &[StationTraffic] {
        &self.summaries
    }

    /// Radius scale for the current summaries. Filtered views get the wider
    /// output range.
    pub fn radius_scale(&self) -> RadiusScale {
        let max_total = self.summaries.iter().map(|s| s.total).max().unwrap_or(0);

        let range = match self.filter {
            TimeFilter::All => UNFILTERED_RADIUS_RANGE,
            TimeFilter::At(_) => FILTERED_RADIUS_RANGE,
        };

        RadiusScale::new(max_total, range)
    }

    pub fn flow_scale(&self) -> FlowScale {
        FlowScale
    }

    /// Screen positions for every station through the map layer's
    /// projection, in station order. Pan/zoom repositioning runs through
    /// here and never touches the traffic summaries.
    pub fn positions<F>(&self, project: F) -> Vec<(f64, f64)>
    where
        F: Fn(f64, f64) -> (f64, f64),
    {
        self.stations
            .iter()
            .map(|s| project(s.lon, s.lat))
            .collect()
    }
}
