//! Reachability analysis for finished layouts.
//!
//! Openings are carved pairwise, so a room can end up cut off from the main
//! room. This module measures that; it never repairs it.

use std::collections::VecDeque;

use crate::house::types::RoomId;
use crate::house::Layout;
use crate::tilemap::Tilemap;

/// Which rooms a walker starting in the main room can reach
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectivityReport {
    /// `reachable[i]` is true when room `i` is reachable from the main room
    pub reachable: Vec<bool>,
    /// Passable cells visited by the flood fill
    pub cells_visited: usize,
}

impl ConnectivityReport {
    pub fn unreachable_rooms(&self) -> Vec<RoomId> {
        self.reachable
            .iter()
            .enumerate()
            .filter(|(_, r)| !**r)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn fully_connected(&self) -> bool {
        self.reachable.iter().all(|r| *r)
    }

    pub fn reachable_count(&self) -> usize {
        self.reachable.iter().filter(|r| **r).count()
    }
}

/// Flood fill over passable cells (room floor, gaps, doors) from the main
/// room's first cell, 4-connected.
pub fn analyze(layout: &Layout) -> ConnectivityReport {
    let grid = &layout.grid;
    let mut reachable = vec![false; layout.rooms.len()];
    let mut visited = Tilemap::new_with(grid.width, grid.height, false);
    let mut queue = VecDeque::new();

    let main = layout.main_room();
    queue.push_back((main.x, main.y));
    visited.set(main.x, main.y, true);

    let mut cells_visited = 0;
    while let Some((x, y)) = queue.pop_front() {
        cells_visited += 1;
        if let Some(id) = grid.get(x, y).room_id() {
            reachable[id] = true;
        }

        for (nx, ny) in grid.neighbors(x, y) {
            if !*visited.get(nx, ny) && grid.get(nx, ny).is_passable() {
                visited.set(nx, ny, true);
                queue.push_back((nx, ny));
            }
        }
    }

    ConnectivityReport {
        reachable,
        cells_visited,
    }
}
