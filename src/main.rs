//! Geo marker clustering tool
//!
//! Reads markers from a CSV file, clusters them for a map viewport of a given
//! size and zoom, and writes what a map would draw: single markers and
//! cluster icons.

use clap::Parser;
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cluster;
mod error;
mod map;


use cluster::{ClustererOptions, LatLng, LatLngBounds, Marker, MarkerClusterer};
use error::{Error, Result};
use map::{DEFAULT_MAP_MAX_ZOOM, HeadlessMap};

#[derive(Parser)]
#[command(name = "rust_markercluster")]
#[command(about = "Geo marker clustering tool", long_about = None)]
struct Args {
    /// Input CSV file with latitude,longitude[,id] columns
    #[arg(short, long, default_value = "markers.csv")]
    input: PathBuf,

    /// Output CSV file with rendered markers and clusters (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixel padding around each cluster's catchment area
    #[arg(short, long, default_value_t = 60)]
    grid_size: u32,

    /// Marker count at which a cluster icon replaces the markers
    #[arg(short = 'm', long, default_value_t = 2)]
    min_cluster_size: usize,

    /// Zoom above which markers are not clustered (default: map max zoom)
    #[arg(long)]
    max_zoom: Option<u32>,

    /// Center clusters on the mean of their members
    #[arg(short, long)]
    average_center: bool,

    /// Map zoom level
    #[arg(short, long, default_value_t = 10)]
    zoom: u32,

    /// Maximum zoom of the map type
    #[arg(long, default_value_t = DEFAULT_MAP_MAX_ZOOM)]
    map_max_zoom: u32,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Viewport center as `lat,lng` (default: center of all markers)
    #[arg(short, long, value_parser = parse_lat_lng)]
    center: Option<LatLng>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        return Err(Error::InvalidArgument {
            name: "width/height",
            message: "viewport must be at least one pixel".to_string(),
        });
    }
    if args.zoom > args.map_max_zoom {
        return Err(Error::InvalidArgument {
            name: "zoom",
            message: format!("{} exceeds map max zoom {}", args.zoom, args.map_max_zoom),
        });
    }

    let markers = read_markers(&args.input)?;
    if markers.is_empty() {
        return Err(Error::NoMarkers);
    }
    info!(count = markers.len(), input = ?args.input, "read markers");

    let center = match args.center {
        Some(center) => center,
        None => LatLngBounds::from_points(markers.iter().map(|m| &m.position))
            .map(|b| b.center())
            .ok_or(Error::NoMarkers)?,
    };
    debug!(?center, zoom = args.zoom, "viewport");

    let map = HeadlessMap::new(center, args.zoom, args.width, args.height)
        .with_max_zoom(args.map_max_zoom);
    let options = ClustererOptions::default()
        .with_grid_size(args.grid_size)
        .with_minimum_cluster_size(args.min_cluster_size)
        .with_max_zoom(args.max_zoom)
        .with_average_center(args.average_center);

    let mut clusterer = MarkerClusterer::new(map, markers, options);
    clusterer.on_ready();
    clusterer.on_idle();

    let items = rendered_items(&clusterer);
    info!(
        clusters = clusterer.total_clusters(),
        rendered = items.len(),
        "clustering finished"
    );

    match &args.output {
        None => {
            let stdout = io::stdout();
            write_rendered(stdout.lock(), &items)?;
        }
        Some(output_file) => {
            write_rendered(File::create(output_file)?, &items)?;
            debug!(output = ?output_file, "rendered items written");
        }
    }
    Ok(())
}

/// Parses `lat,lng` from the command line
fn parse_lat_lng(s: &str) -> std::result::Result<LatLng, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected lat,lng but got {:?}", s))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let lng = lng.trim().parse::<f64>().map_err(|e| e.to_string())?;
    validate_lat_lng(lat, lng)?;
    Ok(LatLng::new(lat, lng))
}

fn validate_lat_lng(lat: f64, lng: f64) -> std::result::Result<(), String> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {} out of range", lat));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(format!("longitude {} out of range", lng));
    }
    Ok(())
}

/// Reads markers from a CSV file
///
/// Expected format: `latitude,longitude[,id]` (header row is optional).
/// Explicit ids must be unique. Rows without an id get the lowest ids no
/// other row uses, in row order.
fn read_markers(filename: &PathBuf) -> Result<Vec<Marker>> {
    let file = File::open(filename)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows: Vec<(LatLng, Option<u64>)> = Vec::new();
    let mut taken = HashSet::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let line = i + 1;

        // A non-numeric first field on the first line is a header
        if i == 0 && record.get(0).is_some_and(|f| f.trim().parse::<f64>().is_err()) {
            continue;
        }
        if record.len() < 2 {
            return Err(Error::InvalidRecord {
                line,
                message: "expected at least latitude and longitude".to_string(),
            });
        }

        let invalid = |message: String| Error::InvalidRecord { line, message };
        let lat = record[0].trim().parse::<f64>().map_err(|e| invalid(e.to_string()))?;
        let lng = record[1].trim().parse::<f64>().map_err(|e| invalid(e.to_string()))?;
        validate_lat_lng(lat, lng).map_err(invalid)?;

        let id = match record.get(2).map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => {
                let id = id.parse::<u64>().map_err(|e| invalid(e.to_string()))?;
                if !taken.insert(id) {
                    return Err(invalid(format!("duplicate marker id {}", id)));
                }
                Some(id)
            }
            None => None,
        };
        rows.push((LatLng::new(lat, lng), id));
    }

    let mut next_free = 0;
    let markers = rows
        .into_iter()
        .map(|(position, id)| {
            let id = id.unwrap_or_else(|| {
                while taken.contains(&next_free) {
                    next_free += 1;
                }
                next_free += 1;
                next_free - 1
            });
            Marker::new(id, position)
        })
        .collect();

    Ok(markers)
}

/// One thing a map would draw
#[derive(Debug, Clone, PartialEq)]
struct RenderedItem {
    kind: &'static str,
    position: LatLng,
    count: usize,
    label: String,
    style: String,
}

/// Collects attached markers in insertion order, then visible cluster icons
fn rendered_items(clusterer: &MarkerClusterer<HeadlessMap>) -> Vec<RenderedItem> {
    let map = clusterer.host();
    let mut items: Vec<RenderedItem> = clusterer
        .markers()
        .iter()
        .filter(|m| map.is_attached(m.id))
        .map(|m| RenderedItem {
            kind: "marker",
            position: m.position,
            count: 1,
            label: m.id.0.to_string(),
            style: String::new(),
        })
        .collect();

    for cluster in clusterer.clusters() {
        if let Some(icon) = map.visible_icon(cluster.key()) {
            items.push(RenderedItem {
                kind: "cluster",
                position: icon.center,
                count: cluster.size(),
                label: icon.sums.text.clone(),
                style: icon.style.as_ref().map(|s| s.url.clone()).unwrap_or_default(),
            });
        }
    }
    items
}

/// Writes rendered items as CSV
///
/// Format: `kind,latitude,longitude,count,label,style`
fn write_rendered(out: impl Write, items: &[RenderedItem]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(out);
    writer.write_record(["kind", "latitude", "longitude", "count", "label", "style"])?;

    for item in items {
        writer.write_record([
            item.kind.to_string(),
            item.position.lat.to_string(),
            item.position.lng.to_string(),
            item.count.to_string(),
            item.label.clone(),
            item.style.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
