//! Output formatting and persistence for station summaries.
//!
//! Supports CSV snapshots, day-profile sweeps, and JSON pretty-printing.

use anyhow::Result;
use tracing::{debug, info};

use crate::traffic::StationTraffic;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;

/// Writes one CSV row per station, in summary order.
pub fn write_summary_csv(path: &str, summaries: &[StationTraffic]) -> Result<()> {
    let file = File::create(path)?;

    let mut writer = WriterBuilder::new().from_writer(file);
    for row in summaries {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!(path, rows = summaries.len(), "Summary CSV written");
    Ok(())
}

/// One row of a day-profile sweep: a station's counts at one slider stop.
#[derive(Debug, Serialize)]
pub struct ProfileRow {
    pub minute: u32,
    pub station_id: String,
    pub arrivals: u32,
    pub departures: u32,
    pub total: u32,
}

/// Writes the long-format profile table, one row per (slider stop, station).
pub fn write_profile_csv(path: &str, rows: &[ProfileRow]) -> Result<()> {
    let file = File::create(path)?;

    let mut writer = WriterBuilder::new().from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!(path, rows = rows.len(), "Profile CSV written");
    Ok(())
}

/// Logs the summary set as pretty-printed JSON.
pub fn print_json(summaries: &[StationTraffic]) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summaries)?);
    Ok(())
}
