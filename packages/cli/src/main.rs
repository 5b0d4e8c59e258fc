#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI demo harness for the camera dataset.
//!
//! Loads a dataset export from disk, runs the requested query, and prints
//! the results. All actual logic lives in the library crates; this binary
//! only wires arguments to queries and formats the output.

use std::path::PathBuf;

use camera_map_camera_models::Dataset;
use clap::{Parser, Subcommand};

/// Query a fixed speed-camera dataset export.
#[derive(Parser)]
#[command(name = "camera_map_cli")]
#[command(about = "Query a fixed speed-camera dataset")]
struct Cli {
    /// Path to the dataset JSON file.
    #[arg(long, default_value = "data/cameras.json")]
    data: PathBuf,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show the dataset overview and aggregate statistics.
    Summary,

    /// List the distinct cities covered by the dataset.
    Cities,

    /// Filter cameras by city, speed limit, and/or direction.
    Filter {
        /// Case-insensitive substring of the city name.
        #[arg(long)]
        city: Option<String>,

        /// Exact speed limit in km/h.
        #[arg(long)]
        limit: Option<u32>,

        /// Case-insensitive substring of the direction label.
        #[arg(long)]
        direction: Option<String>,

        /// Maximum number of rows to print.
        #[arg(long, default_value_t = 20)]
        max_results: usize,
    },

    /// Find cameras within a radius of a point, closest first.
    Nearby {
        /// Latitude of the search center.
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        /// Longitude of the search center.
        #[arg(allow_negative_numbers = true)]
        lon: f64,

        /// Search radius in kilometers.
        radius_km: f64,

        /// Maximum number of rows to print.
        #[arg(long, default_value_t = 20)]
        max_results: usize,
    },

    /// Show the geographic extent of the dataset.
    Extent,

    /// List cameras inside an inclusive lat/lon bounding box.
    InBounds {
        /// Southern edge of the box.
        #[arg(allow_negative_numbers = true)]
        min_lat: f64,

        /// Northern edge of the box.
        #[arg(allow_negative_numbers = true)]
        max_lat: f64,

        /// Western edge of the box.
        #[arg(allow_negative_numbers = true)]
        min_lon: f64,

        /// Eastern edge of the box.
        #[arg(allow_negative_numbers = true)]
        max_lon: f64,
    },

    /// Re-serialize the loaded dataset to a new file.
    Export {
        /// Output file path.
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let dataset = camera_map_dataset::load(&cli.data)?;
    if !dataset.success {
        return Err(format!(
            "dataset {} reports success=false; refusing to query it",
            cli.data.display()
        )
        .into());
    }
    if dataset.records().len() as u64 != dataset.result.total {
        log::warn!(
            "dataset declares {} records but contains {}",
            dataset.result.total,
            dataset.records().len()
        );
    }

    match cli.command {
        Commands::Summary => summary(&dataset),
        Commands::Cities => {
            for city in camera_map_query::unique_cities(&dataset) {
                println!("{city}");
            }
        }
        Commands::Filter {
            city,
            limit,
            direction,
            max_results,
        } => filter(
            &dataset,
            city.as_deref(),
            limit,
            direction.as_deref(),
            max_results,
        ),
        Commands::Nearby {
            lat,
            lon,
            radius_km,
            max_results,
        } => nearby(&dataset, lat, lon, radius_km, max_results),
        Commands::Extent => extent(&dataset),
        Commands::InBounds {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        } => in_bounds(&dataset, min_lat, max_lat, min_lon, max_lon),
        Commands::Export { output } => {
            camera_map_dataset::save(&dataset, &output)?;
            println!(
                "Exported {} records to {}",
                dataset.records().len(),
                output.display()
            );
        }
    }

    Ok(())
}

/// Dataset overview: envelope metadata, aggregates, direction and city
/// breakdowns.
fn summary(dataset: &Dataset) {
    println!("Resource ID: {}", dataset.result.resource_id);
    println!("Declared total: {}", dataset.result.total);
    println!("Records loaded: {}", dataset.records().len());
    println!();

    let stats = camera_map_query::statistics(dataset);
    println!("{stats}");
    println!("Highest limit: {}km/h", stats.max_speed_limit);
    println!("Lowest limit: {}km/h", stats.min_speed_limit);
    println!();

    println!("Directions:");
    let mut directions: Vec<(&String, &u64)> = stats.direction_counts.iter().collect();
    directions.sort_by(|a, b| b.1.cmp(a.1));
    for (direction, count) in directions {
        let label = if direction.is_empty() {
            "(unspecified)"
        } else {
            direction
        };
        println!("  {label}: {count}");
    }
    println!();

    let cities = camera_map_query::unique_cities(dataset);
    println!("Cities ({}):", cities.len());
    for city in cities.iter().take(10) {
        let count = camera_map_query::filter_by_city(dataset, city).len();
        println!("  {city}: {count} cameras");
    }
    if cities.len() > 10 {
        println!("  ... and {} more", cities.len() - 10);
    }
}

/// Applies the provided predicates in sequence (intersection semantics).
fn filter(
    dataset: &Dataset,
    city: Option<&str>,
    limit: Option<u32>,
    direction: Option<&str>,
    max_results: usize,
) {
    let mut subset = dataset.clone();
    if let Some(city) = city {
        let records = camera_map_query::filter_by_city(&subset, city);
        subset.result.records = records;
    }
    if let Some(limit) = limit {
        let records = camera_map_query::filter_by_speed_limit(&subset, limit);
        subset.result.records = records;
    }
    if let Some(direction) = direction {
        let records = camera_map_query::filter_by_direction(&subset, direction);
        subset.result.records = records;
    }

    let matches = subset.records();
    println!("{} cameras match", matches.len());
    for camera in matches.iter().take(max_results) {
        println!("  {camera}");
    }
    if matches.len() > max_results {
        println!("  ... and {} more", matches.len() - max_results);
    }
}

fn nearby(dataset: &Dataset, lat: f64, lon: f64, radius_km: f64, max_results: usize) {
    let hits = camera_map_geo::find_nearby(dataset.records(), lat, lon, radius_km);
    println!(
        "{} cameras within {radius_km}km of ({lat}, {lon})",
        hits.len()
    );
    for hit in hits.iter().take(max_results) {
        println!("  {hit}");
    }
    if hits.len() > max_results {
        println!("  ... and {} more", hits.len() - max_results);
    }
}

fn extent(dataset: &Dataset) {
    let extent = camera_map_geo::bounds(dataset.records());
    println!("{extent}");
    println!(
        "center: ({:.6}, {:.6})",
        extent.center_latitude(),
        extent.center_longitude()
    );
}

fn in_bounds(dataset: &Dataset, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) {
    let hits = camera_map_geo::find_in_bounds(dataset.records(), min_lat, max_lat, min_lon, max_lon);
    println!("{} cameras in bounds", hits.len());
    for camera in &hits {
        println!("  {camera}");
    }
}
