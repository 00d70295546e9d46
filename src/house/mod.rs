//! Procedural house layout generation
//!
//! A layout is built by a strict linear pipeline:
//! 1. Partition the interior into room footprints (BSP)
//! 2. Select the main room
//! 3. Assign a template to every room
//! 4. Stamp rooms and synthesize walls around them
//! 5. Carve one opening between each adjacent room pair
//! 6. Promote outer-ring walls to spawn points
//!
//! Each stage mutates the same grid value; nothing is kept between runs.

pub mod generation;
pub mod selection;
pub mod templates;
pub mod types;

use std::collections::BTreeMap;

use log::info;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::tilemap::Tilemap;

use generation::{
    bsp::{house_interior, partition, RoomSizeRange},
    openings::{carve_openings, CarveReport},
    spawners::place_spawners,
    walls::{stamp_rooms, synthesize_walls},
};
use selection::select_main_room;
use templates::assign_templates;
use types::{OpeningStyle, Room, RoomId, Template, Tile};

/// A finished layout, handed read-only to whatever builds the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub grid: Tilemap<Tile>,
    pub rooms: Vec<Room>,
    /// Template per room, indexed like `rooms`
    pub templates: Vec<Template>,
    pub main_room: RoomId,
    pub opening_style: OpeningStyle,
    pub carve_report: CarveReport,
    /// Spawner cells in placement order
    pub spawners: Vec<(usize, usize)>,
}

impl Layout {
    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn main_room(&self) -> &Room {
        &self.rooms[self.main_room]
    }

    /// Where the player appears: the main room's geometric center.
    pub fn player_spawn(&self) -> (f32, f32) {
        self.main_room().center_f32()
    }

    pub fn template_for_room(&self, id: RoomId) -> Option<&Template> {
        self.templates.get(id)
    }

    /// Template whose wall resource the wall cell at `(x, y)` uses.
    pub fn wall_template_at(&self, x: usize, y: usize) -> Option<&Template> {
        templates::wall_template_at(&self.rooms, &self.templates, x, y)
    }

    /// Cell counts per tile kind, keyed by display name.
    pub fn tile_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for (_, _, tile) in self.grid.iter() {
            *counts.entry(tile.display_name()).or_insert(0) += 1;
        }
        counts
    }
}

/// Run the whole pipeline with the supplied random source.
pub fn generate_layout<R: Rng>(config: &LayoutConfig, rng: &mut R) -> Result<Layout, LayoutError> {
    config.validate()?;

    let mut rooms = Vec::new();
    partition(
        house_interior(config.width, config.height),
        config.partition_depth,
        RoomSizeRange {
            min: config.min_room_size,
            max: config.max_room_size,
        },
        rng,
        &mut rooms,
    )?;

    let main_room = select_main_room(&rooms, config.width, config.height).ok_or(LayoutError::NoRooms)?;

    let templates = assign_templates(
        rooms.len(),
        main_room,
        &config.main_room_templates,
        &config.side_room_templates,
        rng,
    )?;

    let mut grid = Tilemap::new(config.width, config.height);
    stamp_rooms(&mut grid, &rooms);
    synthesize_walls(&mut grid);

    let carve_report = carve_openings(&mut grid, &rooms, config.opening_style, rng);
    let spawners = place_spawners(&mut grid, config.max_spawners, rng);

    info!(
        "generated {}x{} layout: {} rooms, main room {}, {} openings, {} spawners",
        config.width,
        config.height,
        rooms.len(),
        main_room,
        carve_report.openings_carved(),
        spawners.len()
    );

    Ok(Layout {
        grid,
        rooms,
        templates,
        main_room,
        opening_style: config.opening_style,
        carve_report,
        spawners,
    })
}

/// Run the pipeline with a ChaCha8 generator seeded from `seed`.
pub fn generate_layout_from_seed(config: &LayoutConfig, seed: u64) -> Result<Layout, LayoutError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_layout(config, &mut rng)
}
