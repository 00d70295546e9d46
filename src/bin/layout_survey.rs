//! Survey tool: generate many seeds in parallel and report aggregate statistics

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use rayon::prelude::*;

use house_layout::config::LayoutConfig;
use house_layout::connectivity;
use house_layout::house::generate_layout_from_seed;
use house_layout::house::types::OpeningStyle;
use house_layout::verify::verify_layout;

#[derive(Parser, Debug)]
#[command(name = "layout_survey")]
#[command(about = "Generate many house layouts and report aggregate statistics")]
struct Args {
    /// Number of layouts to generate
    #[arg(long, default_value = "1000")]
    runs: u64,

    /// First seed; runs use consecutive seeds from here
    #[arg(long, default_value = "0")]
    start_seed: u64,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Carve single-cell doors instead of two-cell gaps
    #[arg(long)]
    doors: bool,
}

/// Per-seed measurements
struct Sample {
    seed: u64,
    rooms: usize,
    fully_connected: bool,
    unconnected_pairs: usize,
    spawners: usize,
    verified: bool,
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match LayoutConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => LayoutConfig::default(),
    };
    if args.doors {
        config.opening_style = OpeningStyle::Door;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    println!("=== Layout Survey ===");
    println!(
        "Grid {}x{}, rooms {}-{}, depth {}, openings: {}",
        config.width,
        config.height,
        config.min_room_size,
        config.max_room_size,
        config.partition_depth,
        config.opening_style
    );
    println!("Seeds {}..{}", args.start_seed, args.start_seed.saturating_add(args.runs));
    println!();

    let start = Instant::now();
    let end_seed = args.start_seed.saturating_add(args.runs);
    let results: Vec<Result<Sample, (u64, String)>> = (args.start_seed..end_seed)
        .into_par_iter()
        .map(|seed| {
            let layout = generate_layout_from_seed(&config, seed).map_err(|e| (seed, e.to_string()))?;
            let reach = connectivity::analyze(&layout);
            let verification = verify_layout(&layout, config.max_spawners);
            Ok(Sample {
                seed,
                rooms: layout.rooms.len(),
                fully_connected: reach.fully_connected(),
                unconnected_pairs: layout.carve_report.unconnected_pairs(),
                spawners: layout.spawners.len(),
                verified: verification.passed(),
            })
        })
        .collect();
    let elapsed = start.elapsed();

    let mut samples = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(sample) => samples.push(sample),
            Err(failure) => errors.push(failure),
        }
    }

    if let Some((seed, message)) = errors.first() {
        eprintln!("{} seeds failed to generate; first: seed {} ({})", errors.len(), seed, message);
    }
    if samples.is_empty() {
        println!("No layouts generated.");
        return;
    }

    let n = samples.len() as f64;
    let mean_rooms = samples.iter().map(|s| s.rooms).sum::<usize>() as f64 / n;
    let connected = samples.iter().filter(|s| s.fully_connected).count();
    let mean_unconnected = samples.iter().map(|s| s.unconnected_pairs).sum::<usize>() as f64 / n;
    let mean_spawners = samples.iter().map(|s| s.spawners).sum::<usize>() as f64 / n;
    let failures: Vec<u64> = samples.iter().filter(|s| !s.verified).map(|s| s.seed).collect();

    println!("=== Summary ===");
    println!("Layouts:             {} in {:?}", samples.len(), elapsed);
    println!("Mean rooms:          {:.2}", mean_rooms);
    println!(
        "Fully connected:     {:.1}% ({}/{})",
        100.0 * connected as f64 / n,
        connected,
        samples.len()
    );
    println!("Mean unconnected:    {:.2} adjacent pairs", mean_unconnected);
    println!("Mean spawners:       {:.2}", mean_spawners);

    match failures.iter().min() {
        Some(first) => println!(
            "Verification:        {} FAILED (first failing seed: {})",
            failures.len(),
            first
        ),
        None => println!("Verification:        all passed"),
    }
}
