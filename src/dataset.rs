//! Parsers for the two external datasets.
//!
//! The station feed is GBFS-style JSON with the station list nested under
//! `data.stations`; the trip log is a CSV export with one row per rental.
//! Either dataset failing to parse is fatal to initialization.

use crate::traffic::{Station, Trip};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct StationFeed {
    data: StationFeedData,
}

#[derive(Debug, Deserialize)]
struct StationFeedData {
    stations: Vec<StationRecord>,
}

#[derive(Debug, Deserialize)]
struct StationRecord {
    short_name: String,
    lon: f64,
    lat: f64,
}

/// Decodes the station feed JSON into the canonical station list.
///
/// Station identity is the dock's `short_name`, the short code the trip log
/// references. Duplicate codes keep the first record; later ones are dropped
/// with a warning.
pub fn parse_stations(bytes: &[u8]) -> Result<Vec<Station>> {
    let feed: StationFeed =
        serde_json::from_slice(bytes).context("station feed is not valid JSON")?;

    let mut seen = HashSet::new();
    let mut stations = Vec::with_capacity(feed.data.stations.len());

    for record in feed.data.stations {
        if !seen.insert(record.short_name.clone()) {
            warn!(station_id = %record.short_name, "Duplicate station id, keeping the first");
            continue;
        }
        stations.push(Station {
            id: record.short_name,
            lon: record.lon,
            lat: record.lat,
        });
    }

    Ok(stations)
}

#[derive(Debug, Deserialize)]
struct TripRecord {
    start_station_id: String,
    end_station_id: String,
    #[serde(deserialize_with = "de_timestamp")]
    started_at: NaiveDateTime,
    #[serde(deserialize_with = "de_timestamp")]
    ended_at: NaiveDateTime,
}

/// Decodes the trip log CSV. Columns beyond the four we read are ignored;
/// a malformed row fails the whole load.
pub fn parse_trips(bytes: &[u8]) -> Result<Vec<Trip>> {
    let mut rdr = csv::Reader::from_reader(bytes);
    let mut trips = Vec::new();

    for (i, result) in rdr.deserialize().enumerate() {
        let record: TripRecord = result.with_context(|| format!("trip log row {}", i + 1))?;
        trips.push(Trip {
            start_station_id: record.start_station_id,
            end_station_id: record.end_station_id,
            started_at: record.started_at,
            ended_at: record.ended_at,
        });
    }

    Ok(trips)
}

/// Trip timestamps are naive local wall-clock strings, space- or
/// T-separated, with an optional fractional-second tail.
fn de_timestamp<'de, D>(de: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(&raw, fmt) {
            return Ok(ts);
        }
    }

    Err(serde::de::Error::custom(format!(
        "unparseable trip timestamp {raw:?}"
    )))
}
