//! Spawn point placement on the outer wall ring

use log::debug;
use rand::Rng;

use crate::house::types::Tile;
use crate::tilemap::Tilemap;

/// Wall cells lying on the grid's outermost ring, row-major.
pub fn outer_wall_cells(grid: &Tilemap<Tile>) -> Vec<(usize, usize)> {
    grid.iter()
        .filter(|&(x, y, tile)| *tile == Tile::Wall && grid.on_outer_ring(x, y))
        .map(|(x, y, _)| (x, y))
        .collect()
}

/// Promote up to `max_count` outer-ring walls to spawners.
///
/// Each pick is drawn from the cells not yet chosen, so no cell is promoted
/// twice. Placement stops early when the ring runs out of walls.
pub fn place_spawners<R: Rng>(grid: &mut Tilemap<Tile>, max_count: usize, rng: &mut R) -> Vec<(usize, usize)> {
    let mut pool = outer_wall_cells(grid);
    let mut placed = Vec::with_capacity(max_count.min(pool.len()));

    while placed.len() < max_count && !pool.is_empty() {
        let index = rng.gen_range(0..pool.len());
        let (x, y) = pool.remove(index);
        grid.set(x, y, Tile::Spawner);
        placed.push((x, y));
    }

    debug!("placed {} of {} spawners", placed.len(), max_count);
    placed
}
