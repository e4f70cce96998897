//! Station traffic aggregation.
//!
//! Counts trip endpoints per station: departures group by start station id,
//! arrivals by end station id. Every aggregation pass produces fresh summary
//! records; the canonical [`Station`] values are never mutated.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

/// A bike-share dock as loaded from the station feed.
///
/// Identity and coordinates only. Traffic counts live in [`StationTraffic`]
/// and are recomputed on every filter application.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
}

/// One rental: where it started and ended, and when.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_station_id: String,
    pub end_station_id: String,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}

/// Per-station counts for one aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationTraffic {
    pub station_id: String,
    pub arrivals: u32,
    pub departures: u32,
    pub total: u32,
}

impl StationTraffic {
    /// Share of this station's traffic that is outbound, in [0, 1].
    /// A station with no traffic reports 0.0 rather than dividing by zero.
    pub fn departure_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.departures as f64 / self.total as f64
        }
    }
}

/// Counts arrivals and departures over `trips` for every station.
///
/// Output has the same length and order as `stations`. Stations no trip
/// touches still get a record, with all counts zero. Trips referencing ids
/// absent from `stations` land in groups nothing reads, so they contribute
/// nothing and never error.
pub fn compute_station_traffic(stations: &[Station], trips: &[Trip]) -> Vec<StationTraffic> {
    // Grouping tables are rebuilt per call so repeated passes stay independent.
    let mut departures: HashMap<&str, u32> = HashMap::new();
    let mut arrivals: HashMap<&str, u32> = HashMap::new();

    for trip in trips {
        *departures.entry(trip.start_station_id.as_str()).or_default() += 1;
        *arrivals.entry(trip.end_station_id.as_str()).or_default() += 1;
    }

    stations
        .iter()
        .map(|station| {
            let departures = departures.get(station.id.as_str()).copied().unwrap_or(0);
            let arrivals = arrivals.get(station.id.as_str()).copied().unwrap_or(0);

            StationTraffic {
                station_id: station.id.clone(),
                arrivals,
                departures,
                total: arrivals + departures,
            }
        })
        .collect()
}
