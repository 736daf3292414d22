//! Parcel processing pipeline.
//!
//! Reads the parcel polygons and text labels exported from the survey
//! drawing, converts them to WGS84, matches labels to parcels and writes
//! the merged map files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use parcelmap::config::Config;
use parcelmap::geojson::{read_collection, write_collection};
use parcelmap::pipeline::process;

#[derive(Parser, Debug)]
#[command(name = "process")]
#[command(about = "Convert HTRS96/TM parcels to WGS84 and attach parcel labels")]
struct Args {
    /// GeoJSON file with parcel polygons
    #[arg(short, long, default_value = "camp-parcels-final.geojson")]
    parcels: PathBuf,

    /// GeoJSON file with text label points
    #[arg(short, long, default_value = "camp-labels.geojson")]
    labels: PathBuf,

    /// Output directory (defaults to the parcels file's directory)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log matching details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    info!("Parcelmap");
    info!(
        "Projection: TM, central meridian {}, k0 {}",
        config.projection.central_meridian, config.projection.scale_factor
    );

    info!("Reading input files...");
    let parcels = read_collection(&args.parcels)?;
    let labels = read_collection(&args.labels)?;

    let pb = ProgressBar::new(parcels.features.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let output = process(&parcels, &labels, &config, &pb)?;
    output.summary.log();

    let out_dir = args
        .out_dir
        .or_else(|| config.output.dir.clone())
        .or_else(|| args.parcels.parent().map(PathBuf::from))
        .unwrap_or_default();
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let files = &config.output;
    write_collection(out_dir.join(&files.processed_file), &output.all)?;
    write_collection(out_dir.join(&files.matched_file), &output.matched)?;
    write_collection(out_dir.join(&files.labels_file), &output.labels)?;

    info!("Done");
    Ok(())
}
