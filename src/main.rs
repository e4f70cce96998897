//! CLI entry point for the bikeflow station-traffic tool.
//!
//! Provides subcommands for computing per-station traffic summaries from a
//! station feed and a trip log, and for sweeping the time-of-day filter
//! across a whole day.

use anyhow::{Context, Result};
use bikeflow::controller::TrafficController;
use bikeflow::dataset::{parse_stations, parse_trips};
use bikeflow::fetch::{BasicClient, read_source};
use bikeflow::filter::TimeFilter;
use bikeflow::output::{ProfileRow, print_json, write_profile_csv, write_summary_csv};
use bikeflow::traffic::{Station, Trip};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeflow")]
#[command(about = "A tool to compute bike-share station traffic for map overlays", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute per-station traffic, optionally filtered to a time of day
    Summarize {
        /// Path or URL of the station feed JSON
        #[arg(value_name = "STATIONS")]
        stations: String,

        /// Path or URL of the trip log CSV
        #[arg(value_name = "TRIPS")]
        trips: String,

        /// Time-of-day filter: HH:MM, minutes since midnight, or -1 for none
        #[arg(short, long, default_value = "-1")]
        at: String,

        /// CSV file to write the summaries to
        #[arg(short, long, default_value = "traffic.csv")]
        output: String,

        /// Also log the summaries as pretty-printed JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Sweep the time filter across the day, one recompute per stop
    Profile {
        /// Path or URL of the station feed JSON
        #[arg(value_name = "STATIONS")]
        stations: String,

        /// Path or URL of the trip log CSV
        #[arg(value_name = "TRIPS")]
        trips: String,

        /// Minutes between slider stops
        #[arg(short, long, default_value_t = 60)]
        step: u32,

        /// CSV file to write the profile table to
        #[arg(short, long, default_value = "profile.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeflow.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeflow.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            stations,
            trips,
            at,
            output,
            json,
        } => {
            let filter = TimeFilter::parse(&at)?;
            let (stations, trips) = load_datasets(&stations, &trips).await?;

            let mut controller = TrafficController::new(stations, trips);
            let summaries = controller.set_filter(filter).to_vec();

            if let Some(busiest) = summaries.iter().max_by_key(|s| s.total) {
                info!(
                    station_id = %busiest.station_id,
                    arrivals = busiest.arrivals,
                    departures = busiest.departures,
                    total = busiest.total,
                    "Busiest station"
                );
            }

            if json {
                print_json(&summaries)?;
            }
            write_summary_csv(&output, &summaries)?;

            let scale = controller.radius_scale();
            info!(
                output = %output,
                stations = summaries.len(),
                radius_domain = ?scale.domain(),
                radius_range = ?scale.range(),
                "Summary written"
            );
        }
        Commands::Profile {
            stations,
            trips,
            step,
            output,
        } => {
            let step = step.max(1);
            let (stations, trips) = load_datasets(&stations, &trips).await?;

            let mut controller = TrafficController::new(stations, trips);

            let mut rows = Vec::new();
            let mut minute = 0;
            while minute < 1440 {
                let summaries = controller.set_filter(TimeFilter::At(minute));
                rows.extend(summaries.iter().map(|s| ProfileRow {
                    minute,
                    station_id: s.station_id.clone(),
                    arrivals: s.arrivals,
                    departures: s.departures,
                    total: s.total,
                }));
                minute += step;
            }

            write_profile_csv(&output, &rows)?;
            info!(output = %output, step, rows = rows.len(), "Profile written");
        }
    }

    Ok(())
}

/// Loads both datasets concurrently from file paths or URLs. Either one
/// failing aborts startup; there is no partial result.
#[tracing::instrument(fields(stations = %stations_src, trips = %trips_src))]
async fn load_datasets(stations_src: &str, trips_src: &str) -> Result<(Vec<Station>, Vec<Trip>)> {
    let client = BasicClient::new();

    let fetched = tokio::try_join!(
        read_source(&client, stations_src),
        read_source(&client, trips_src),
    );
    let (station_bytes, trip_bytes) = match fetched {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "Dataset fetch failed");
            return Err(e);
        }
    };

    let stations = parse_stations(&station_bytes).context("loading station feed")?;
    let trips = parse_trips(&trip_bytes).context("loading trip log")?;

    info!(
        stations = stations.len(),
        trips = trips.len(),
        "Datasets loaded"
    );

    Ok((stations, trips))
}
