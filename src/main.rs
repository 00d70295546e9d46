use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::LevelFilter;

use house_layout::ascii::{self, AsciiMode};
use house_layout::config::LayoutConfig;
use house_layout::connectivity;
use house_layout::export;
use house_layout::house::generate_layout_from_seed;
use house_layout::house::types::OpeningStyle;
use house_layout::logging;
use house_layout::verify::verify_layout;

#[derive(Parser, Debug)]
#[command(name = "house_layout")]
#[command(about = "Generate procedural house layouts with BSP room partitioning")]
struct Args {
    /// Width of the grid in cells (default: 40)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the grid in cells (default: 30)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Smallest room side (default: 6)
    #[arg(long)]
    min_room: Option<usize>,

    /// Largest room side (default: 12)
    #[arg(long)]
    max_room: Option<usize>,

    /// Partition depth; at most 2^depth rooms (default: 4)
    #[arg(long)]
    depth: Option<u32>,

    /// Maximum number of enemy spawners (default: 4)
    #[arg(long)]
    max_spawners: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON config file; flags given on the command line override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Carve single-cell doors instead of two-cell gaps
    #[arg(long)]
    doors: bool,

    /// Print the map with ANSI colors
    #[arg(long)]
    color: bool,

    /// Only print the seed and summary, no map
    #[arg(long)]
    quiet: bool,

    /// Show generation debug logs on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Export the layout to PNG (e.g., "house.png")
    #[arg(long)]
    export_png: Option<String>,

    /// Pixels per cell for PNG export
    #[arg(long, default_value = "8")]
    png_scale: u32,

    /// Export the layout to JSON (e.g., "house.json")
    #[arg(long)]
    export_json: Option<String>,

    /// Export the layout, room table and legend to a text file
    #[arg(long)]
    export_text: Option<String>,
}

fn build_config(args: &Args) -> Result<LayoutConfig, String> {
    let mut config = match &args.config {
        Some(path) => LayoutConfig::load(path).map_err(|e| e.to_string())?,
        None => LayoutConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(min) = args.min_room {
        config.min_room_size = min;
    }
    if let Some(max) = args.max_room {
        config.max_room_size = max;
    }
    if let Some(depth) = args.depth {
        config.partition_depth = depth;
    }
    if let Some(count) = args.max_spawners {
        config.max_spawners = count;
    }
    if args.doors {
        config.opening_style = OpeningStyle::Door;
    }

    Ok(config)
}

fn main() {
    let args = Args::parse();

    if args.verbose {
        if let Err(e) = logging::init(LevelFilter::Debug) {
            eprintln!("Warning: could not install logger: {}", e);
        }
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let seed = args.seed.unwrap_or_else(rand::random);

    println!("Generating house with seed: {}", seed);
    println!(
        "Grid size: {}x{}, rooms {}-{}, depth {}",
        config.width, config.height, config.min_room_size, config.max_room_size, config.partition_depth
    );

    let layout = match generate_layout_from_seed(&config, seed) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let main_room = layout.main_room();
    let main_template = layout
        .template_for_room(layout.main_room)
        .map(|t| t.name.as_str())
        .unwrap_or("-");
    println!(
        "Created {} rooms (main room {}: {}x{} at ({}, {}), template {})",
        layout.rooms.len(),
        layout.main_room,
        main_room.width,
        main_room.height,
        main_room.x,
        main_room.y,
        main_template
    );

    let report = &layout.carve_report;
    println!(
        "Openings: {} {} carved, {} adjacent pairs left unconnected",
        report.openings_carved(),
        layout.opening_style,
        report.unconnected_pairs()
    );

    let reach = connectivity::analyze(&layout);
    println!(
        "Reachable from main room: {}/{} rooms",
        reach.reachable_count(),
        layout.rooms.len()
    );
    if !reach.fully_connected() {
        eprintln!("Warning: unreachable rooms {:?}", reach.unreachable_rooms());
    }

    println!("Spawners: {}/{}", layout.spawners.len(), config.max_spawners);
    let (px, py) = layout.player_spawn();
    println!("Player spawn: ({:.1}, {:.1})", px, py);

    if !args.quiet {
        println!();
        if args.color {
            ascii::print_colored_ascii_layout(&layout, AsciiMode::Tiles);
        } else {
            ascii::print_ascii_layout(&layout, AsciiMode::Tiles);
        }
        println!();
        print!("{}", ascii::tile_legend());
        println!();
        print!("{}", ascii::room_table(&layout));
    }

    let verification = verify_layout(&layout, config.max_spawners);
    if args.quiet {
        println!("Verification: {:?}", verification.status());
    } else {
        println!();
        print!("{}", verification.format());
    }

    if let Some(path) = &args.export_png {
        match export::export_layout_png(&layout, path, args.png_scale) {
            Ok(()) => println!("Exported PNG to {}", path),
            Err(e) => eprintln!("Failed to export PNG: {}", e),
        }
    }

    if let Some(path) = &args.export_json {
        match export::export_layout_json(&layout, seed, path) {
            Ok(()) => println!("Exported JSON to {}", path),
            Err(e) => eprintln!("Failed to export JSON: {}", e),
        }
    }

    if let Some(path) = &args.export_text {
        match ascii::export_layout_file(&layout, seed, path) {
            Ok(()) => println!("Exported layout text to {}", path),
            Err(e) => eprintln!("Failed to export layout text: {}", e),
        }
    }
}
