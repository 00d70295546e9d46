use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use house_layout::config::LayoutConfig;
use house_layout::connectivity;
use house_layout::error::{LayoutError, PoolKind};
use house_layout::house::generation::{
    adjacency, carve_openings, find_candidates, place_spawners, stamp_rooms, synthesize_walls,
};
use house_layout::house::selection::select_main_room;
use house_layout::house::types::{OpeningStyle, Room, Tile};
use house_layout::house::{generate_layout, generate_layout_from_seed, Layout};
use house_layout::tilemap::Tilemap;
use house_layout::verify::verify_layout;

const SEEDS: u64 = 200;

fn layouts(config: &LayoutConfig) -> impl Iterator<Item = (u64, Layout)> + '_ {
    (0..SEEDS).map(move |seed| (seed, generate_layout_from_seed(config, seed).unwrap()))
}

fn door_config() -> LayoutConfig {
    LayoutConfig {
        opening_style: OpeningStyle::Door,
        ..LayoutConfig::default()
    }
}

fn small_config() -> LayoutConfig {
    LayoutConfig {
        width: 24,
        height: 18,
        min_room_size: 3,
        max_room_size: 8,
        partition_depth: 5,
        max_spawners: 6,
        ..LayoutConfig::default()
    }
}

#[test]
fn test_rooms_never_overlap() {
    for config in [LayoutConfig::default(), small_config()] {
        for (seed, layout) in layouts(&config) {
            for (i, a) in layout.rooms.iter().enumerate() {
                for b in &layout.rooms[i + 1..] {
                    assert!(!a.overlaps(b), "seed {}: {:?} overlaps {:?}", seed, a, b);
                }
            }
        }
    }
}

#[test]
fn test_rooms_fully_enclosed() {
    for config in [LayoutConfig::default(), small_config(), door_config()] {
        for (seed, layout) in layouts(&config) {
            for (x, y, tile) in layout.grid.iter() {
                let Some(id) = tile.room_id() else { continue };
                for (nx, ny) in layout.grid.neighbors(x, y) {
                    let ok = match layout.grid.get(nx, ny) {
                        Tile::Room(other) => *other == id,
                        Tile::Wall | Tile::Gap | Tile::Door | Tile::Spawner => true,
                        Tile::Empty => false,
                    };
                    assert!(ok, "seed {}: room {} leaks at ({}, {})", seed, id, nx, ny);
                }
            }
        }
    }
}

#[test]
fn test_one_opening_per_connectable_pair() {
    for config in [LayoutConfig::default(), small_config(), door_config()] {
        let run = config.opening_style.run_length();
        for (seed, layout) in layouts(&config) {
            for conn in &layout.carve_report.connections {
                assert_eq!(
                    conn.opening.is_some(),
                    conn.candidates > 0,
                    "seed {}: pair ({}, {})",
                    seed,
                    conn.a,
                    conn.b
                );
                if let Some(opening) = &conn.opening {
                    assert_eq!(opening.length, run);
                    for (x, y) in opening.cells() {
                        assert_eq!(*layout.grid.get(x, y), config.opening_style.tile());
                    }
                }
            }

            let opening_tiles = layout.grid.count_where(|t| matches!(t, Tile::Gap | Tile::Door));
            assert_eq!(opening_tiles, layout.carve_report.openings_carved() * run, "seed {}", seed);

            // Every adjacent, non-overlapping pair is accounted for.
            for a in 0..layout.rooms.len() {
                for b in (a + 1)..layout.rooms.len() {
                    let (v, h) = adjacency(&layout.rooms[a], &layout.rooms[b]);
                    assert_eq!(layout.carve_report.connection(a, b).is_some(), v || h);
                }
            }
        }
    }
}

#[test]
fn test_spawners_bounded_and_on_outer_ring() {
    for config in [LayoutConfig::default(), small_config()] {
        for (seed, layout) in layouts(&config) {
            let count = layout.grid.count_where(|t| *t == Tile::Spawner);
            assert_eq!(count, layout.spawners.len());
            assert!(count <= config.max_spawners, "seed {}", seed);
            for (x, y, tile) in layout.grid.iter() {
                if *tile == Tile::Spawner {
                    assert!(layout.grid.on_outer_ring(x, y), "seed {}: spawner at ({}, {})", seed, x, y);
                }
            }
        }
    }
}

#[test]
fn test_same_seed_same_layout() {
    let config = small_config();
    for seed in [0, 1, 99, u64::MAX] {
        let a = generate_layout_from_seed(&config, seed).unwrap();
        let b = generate_layout_from_seed(&config, seed).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.rooms, b.rooms);
        assert_eq!(a, b);
    }
}

#[test]
fn test_main_room_selection_is_pure() {
    for (_, layout) in layouts(&LayoutConfig::default()).take(20) {
        let first = select_main_room(&layout.rooms, layout.width(), layout.height());
        for _ in 0..5 {
            assert_eq!(select_main_room(&layout.rooms, layout.width(), layout.height()), first);
        }
        assert_eq!(first, Some(layout.main_room));
    }
}

#[test]
fn test_generated_layouts_verify() {
    for config in [LayoutConfig::default(), small_config(), door_config()] {
        for (seed, layout) in layouts(&config) {
            let report = verify_layout(&layout, config.max_spawners);
            assert!(report.passed(), "seed {}:\n{}", seed, report.format());
        }
    }
}

#[test]
fn test_connectivity_counts_main_room() {
    for (_, layout) in layouts(&LayoutConfig::default()).take(50) {
        let reach = connectivity::analyze(&layout);
        assert!(reach.reachable[layout.main_room]);
        assert_eq!(reach.reachable_count() + reach.unreachable_rooms().len(), layout.rooms.len());
    }
}

#[test]
fn test_single_split_gives_two_rooms() {
    let config = LayoutConfig {
        width: 10,
        height: 10,
        min_room_size: 3,
        max_room_size: 6,
        partition_depth: 1,
        ..LayoutConfig::default()
    };
    for seed in 0..50 {
        let layout = generate_layout_from_seed(&config, seed).unwrap();
        assert_eq!(layout.rooms.len(), 2, "seed {}", seed);
        for room in &layout.rooms {
            assert!(room.x >= 1 && room.y >= 1);
            assert!(room.x_max() <= 9 && room.y_max() <= 9, "seed {}: {:?}", seed, room);
        }
        assert!(!layout.rooms[0].overlaps(&layout.rooms[1]));
    }
}

#[test]
fn test_shared_wall_of_four_gets_one_gap() {
    let rooms = vec![Room::new(1, 1, 3, 4), Room::new(5, 1, 3, 4)];
    let mut grid = Tilemap::new(9, 6);
    stamp_rooms(&mut grid, &rooms);
    synthesize_walls(&mut grid);
    let walls_before = grid.count_where(|t| *t == Tile::Wall);

    assert!(!find_candidates(&grid, &rooms, 0, 1, OpeningStyle::Gap).is_empty());

    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let report = carve_openings(&mut grid, &rooms, OpeningStyle::Gap, &mut rng);
    assert_eq!(report.openings_carved(), 1);
    assert_eq!(grid.count_where(|t| *t == Tile::Wall), walls_before - 2);
    assert_eq!(grid.count_where(|t| *t == Tile::Gap), 2);
}

#[test]
fn test_zero_spawner_cap() {
    let config = LayoutConfig {
        max_spawners: 0,
        ..LayoutConfig::default()
    };
    for (_, layout) in layouts(&config).take(20) {
        assert!(layout.spawners.is_empty());
        assert_eq!(layout.grid.count_where(|t| *t == Tile::Spawner), 0);
    }

    let rooms = vec![Room::new(1, 1, 4, 4)];
    let mut grid = Tilemap::new(6, 6);
    stamp_rooms(&mut grid, &rooms);
    synthesize_walls(&mut grid);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert!(place_spawners(&mut grid, 0, &mut rng).is_empty());
}

#[test]
fn test_empty_main_pool_is_an_error() {
    let config = LayoutConfig {
        partition_depth: 0,
        main_room_templates: Vec::new(),
        ..LayoutConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert_eq!(
        generate_layout(&config, &mut rng),
        Err(LayoutError::EmptyTemplatePool(PoolKind::Main))
    );
}

#[test]
fn test_corridor_separated_rooms_not_connected() {
    // a.x_max is two columns short of b.x
    let rooms = vec![Room::new(1, 1, 3, 4), Room::new(6, 1, 3, 4)];
    assert_eq!(adjacency(&rooms[0], &rooms[1]), (false, false));

    let mut grid = Tilemap::new(10, 6);
    stamp_rooms(&mut grid, &rooms);
    synthesize_walls(&mut grid);
    let before = grid.clone();

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let report = carve_openings(&mut grid, &rooms, OpeningStyle::Gap, &mut rng);
    assert_eq!(report.openings_carved(), 0);
    assert!(report.connection(0, 1).is_none());
    assert_eq!(grid, before);
}

#[test]
fn test_invalid_config_rejected() {
    let config = LayoutConfig {
        width: 3,
        ..LayoutConfig::default()
    };
    assert_eq!(
        generate_layout_from_seed(&config, 0),
        Err(LayoutError::InvalidDimensions { width: 3, height: 30 })
    );

    let config = LayoutConfig {
        min_room_size: 9,
        max_room_size: 4,
        ..LayoutConfig::default()
    };
    assert_eq!(
        generate_layout_from_seed(&config, 0),
        Err(LayoutError::InvalidRoomSize { min: 9, max: 4 })
    );
}

#[test]
fn test_oversized_room_bounds_generate_single_room() {
    let config = LayoutConfig {
        min_room_size: usize::MAX / 2 + 1,
        max_room_size: usize::MAX,
        ..LayoutConfig::default()
    };
    let layout = generate_layout_from_seed(&config, 0).unwrap();
    assert_eq!(layout.rooms.len(), 1);
    assert_eq!(layout.main_room, 0);
}
