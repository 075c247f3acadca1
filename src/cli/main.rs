//! Command-line front end for the boundary engine.
//!
//! Every subcommand reads places from JSON files and prints its answer as JSON
//! on stdout. Logging goes to stderr.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use spanbound::locate::{PlaceIndex, PlaceLocator};
use spanbound::specificity::{find_nearby_places, infer_admin_level, IterSupplier};
use spanbound::{Coordinate, EngineConfig, PlaceRecord};

#[derive(Parser, Debug)]
#[command(name = "spanbound")]
#[command(about = "Point-in-place, boundary relationship and nearby-place queries")]
struct Args {
    /// Engine config file (TOML); built-in tables are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Whether a point lies inside a place
    Contains {
        /// Place record JSON file
        #[arg(long)]
        place: PathBuf,

        /// Point as "lat,lon"
        #[arg(long)]
        point: Coordinate,
    },
    /// Kilometres from a point to a place's boundary
    Distance {
        #[arg(long)]
        place: PathBuf,

        #[arg(long)]
        point: Coordinate,
    },
    /// Classify how two places' boundaries relate
    Relate {
        #[arg(long)]
        a: PathBuf,

        #[arg(long)]
        b: PathBuf,
    },
    /// Infer an admin level from a place type and name
    Level {
        #[arg(long = "type")]
        place_type: Option<String>,

        #[arg(long)]
        name: Option<String>,
    },
    /// Places near a place, nearest first
    Nearby {
        #[arg(long)]
        place: PathBuf,

        /// JSON array of candidate place records
        #[arg(long)]
        candidates: PathBuf,

        /// Search radius in km; derived from the place's admin level when omitted
        #[arg(long)]
        radius: Option<f64>,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Admin hierarchy and enclosing city for a point
    Locate {
        /// JSON array of place records
        #[arg(long)]
        places: PathBuf,

        #[arg(long)]
        point: Coordinate,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            EngineConfig::load_from_file(path)?
        }
        None => EngineConfig::default(),
    };

    let output = run(args.command, &config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(command: Command, config: &EngineConfig) -> Result<Value> {
    let tables = &config.heuristics;

    match command {
        Command::Contains { place, point } => {
            let place: PlaceRecord = read_json(&place)?;
            let inside = place.contains_point(point.latitude, point.longitude);
            Ok(json!({ "id": place.id, "point": point, "contains": inside }))
        }
        Command::Distance { place, point } => {
            let place: PlaceRecord = read_json(&place)?;
            if !place.has_boundary() {
                warn!("Place {} has no usable boundary", place.id);
            }
            let distance = place.distance_to_boundary(point.latitude, point.longitude);
            Ok(json!({ "id": place.id, "point": point, "distance_km": distance }))
        }
        Command::Relate { a, b } => {
            let a: PlaceRecord = read_json(&a)?;
            let b: PlaceRecord = read_json(&b)?;
            let relationship = a.boundary_relationship_with(&b);
            Ok(json!({ "a": a.id, "b": b.id, "relationship": relationship }))
        }
        Command::Level { place_type, name } => {
            if place_type.is_none() && name.is_none() {
                bail!("at least one of --type or --name is required");
            }
            let level = infer_admin_level(place_type.as_deref(), name.as_deref(), tables);
            Ok(json!({
                "type": place_type,
                "name": name,
                "admin_level": level,
                "label": level.map(|l| l.label()),
            }))
        }
        Command::Nearby {
            place,
            candidates,
            radius,
            limit,
        } => {
            let origin: PlaceRecord = read_json(&place)?;
            let candidates = read_places(&candidates)?;
            info!(
                "Searching {} candidates near {}",
                candidates.len(),
                origin.id
            );

            let radius_km =
                radius.unwrap_or_else(|| config.radius.radius_for(origin.admin_level(tables)));
            let mut supplier = IterSupplier::new(candidates);
            let nearby = find_nearby_places(&origin, &mut supplier, Some(radius_km), limit, config);

            let results: Vec<Value> = nearby
                .iter()
                .map(|n| {
                    json!({
                        "id": n.place.id,
                        "name": n.place.name,
                        "distance_km": n.distance_km,
                    })
                })
                .collect();
            Ok(json!({ "id": origin.id, "radius_km": radius_km, "results": results }))
        }
        Command::Locate { places, point } => {
            let places = read_places(&places)?;
            let locator = PlaceLocator::new(PlaceIndex::build(places), config.clone());

            let (lat, lon) = (point.latitude, point.longitude);
            let containing: Vec<String> = locator
                .containing_places(lat, lon)
                .iter()
                .map(|p| p.id.clone())
                .collect();
            let city = locator.nearest_enclosing_city(lat, lon);

            Ok(json!({
                "point": point,
                "hierarchy": locator.hierarchy(lat, lon),
                "containing": containing,
                "city": city.map(|c| json!({ "id": c.id, "name": c.name })),
            }))
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Read a JSON array of places, skipping entries that do not parse.
fn read_places(path: &Path) -> Result<Vec<PlaceRecord>> {
    let raw: Vec<Value> = read_json(path)?;
    let total = raw.len();

    let places: Vec<PlaceRecord> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(place) => Some(place),
            Err(e) => {
                warn!("Skipping place #{} in {}: {}", i, path.display(), e);
                None
            }
        })
        .collect();

    info!("Loaded {}/{} places from {}", places.len(), total, path.display());
    Ok(places)
}
