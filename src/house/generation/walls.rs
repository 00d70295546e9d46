//! Room stamping and wall synthesis
//!
//! Walls grow outward from room cells: every empty orthogonal neighbour of a
//! room becomes wall, which closes each room off from raw empty space and
//! produces the outer wall ring wherever a room touches the interior margin.

use log::debug;

use crate::house::types::{Room, Tile};
use crate::tilemap::Tilemap;

/// Write `Tile::Room(i)` into every cell of `rooms[i]`.
pub fn stamp_rooms(grid: &mut Tilemap<Tile>, rooms: &[Room]) {
    for (id, room) in rooms.iter().enumerate() {
        for (x, y) in room.cells() {
            grid.set(x, y, Tile::Room(id));
        }
    }
}

/// Mark every empty 4-neighbour of a room cell as wall. Returns the number
/// of walls placed. Off-grid neighbours are skipped; diagonals are untouched.
pub fn synthesize_walls(grid: &mut Tilemap<Tile>) -> usize {
    let room_cells: Vec<(usize, usize)> = grid
        .iter()
        .filter(|(_, _, tile)| tile.is_room())
        .map(|(x, y, _)| (x, y))
        .collect();

    let mut placed = 0;
    for (x, y) in room_cells {
        for (nx, ny) in grid.neighbors(x, y) {
            if *grid.get(nx, ny) == Tile::Empty {
                grid.set(nx, ny, Tile::Wall);
                placed += 1;
            }
        }
    }

    debug!("synthesized {} wall cells", placed);
    placed
}
