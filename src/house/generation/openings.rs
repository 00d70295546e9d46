//! Openings between adjacent rooms
//!
//! Two rooms are adjacent when exactly one wall line separates them. For each
//! adjacent pair we enumerate every run of wall cells on the shared line whose
//! perpendicular neighbours are one room on each side, then open exactly one
//! run at random. Pairs without a valid run stay unconnected: only direct
//! neighbours are ever joined, so transitive reachability is not guaranteed.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::house::types::{Opening, OpeningStyle, Orientation, Room, RoomId, Tile};
use crate::tilemap::Tilemap;

/// Outcome of carving for one adjacent room pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairConnection {
    pub a: RoomId,
    pub b: RoomId,
    /// Number of valid runs found on the shared wall line
    pub candidates: usize,
    /// The run that was opened, if any
    pub opening: Option<Opening>,
}

/// Every adjacent pair considered by the carver, in scan order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarveReport {
    pub connections: Vec<PairConnection>,
}

impl CarveReport {
    pub fn openings(&self) -> impl Iterator<Item = &Opening> {
        self.connections.iter().filter_map(|c| c.opening.as_ref())
    }

    pub fn openings_carved(&self) -> usize {
        self.openings().count()
    }

    /// Adjacent pairs that were left without an opening
    pub fn unconnected_pairs(&self) -> usize {
        self.connections.iter().filter(|c| c.opening.is_none()).count()
    }

    pub fn connection(&self, a: RoomId, b: RoomId) -> Option<&PairConnection> {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        self.connections.iter().find(|c| c.a == lo && c.b == hi)
    }
}

/// Which shared wall lines separate two rooms: (vertical, horizontal).
/// Both can hold only for diagonal neighbours, which never yield a run.
pub fn adjacency(a: &Room, b: &Room) -> (bool, bool) {
    let vertical = a.x_max() + 1 == b.x || b.x_max() + 1 == a.x;
    let horizontal = a.y_max() + 1 == b.y || b.y_max() + 1 == a.y;
    (vertical, horizontal)
}

/// Enumerate every valid opening between rooms `a` and `b`.
pub fn find_candidates(
    grid: &Tilemap<Tile>,
    rooms: &[Room],
    a: RoomId,
    b: RoomId,
    style: OpeningStyle,
) -> Vec<Opening> {
    let (ra, rb) = (&rooms[a], &rooms[b]);
    let (vertical, horizontal) = adjacency(ra, rb);
    let run = style.run_length();
    let mut candidates = Vec::new();

    if vertical {
        let wall_x = if ra.x_max() + 1 == rb.x { ra.x_max() } else { rb.x_max() };
        let start = ra.y.max(rb.y);
        let end = ra.y_max().min(rb.y_max());
        for y in start..end {
            if y + run > end {
                break;
            }
            let opening = Opening { x: wall_x, y, orientation: Orientation::Vertical, length: run };
            if run_is_valid(grid, &opening, a, b) {
                candidates.push(opening);
            }
        }
    }

    if horizontal {
        let wall_y = if ra.y_max() + 1 == rb.y { ra.y_max() } else { rb.y_max() };
        let start = ra.x.max(rb.x);
        let end = ra.x_max().min(rb.x_max());
        for x in start..end {
            if x + run > end {
                break;
            }
            let opening = Opening { x, y: wall_y, orientation: Orientation::Horizontal, length: run };
            if run_is_valid(grid, &opening, a, b) {
                candidates.push(opening);
            }
        }
    }

    candidates
}

/// Every cell of the run is wall and sits between room `a` and room `b`.
fn run_is_valid(grid: &Tilemap<Tile>, opening: &Opening, a: RoomId, b: RoomId) -> bool {
    opening.cells().into_iter().all(|(x, y)| {
        grid.get_checked(x as i32, y as i32) == Some(&Tile::Wall)
            && separates(grid, x, y, opening.orientation, a, b)
    })
}

fn separates(grid: &Tilemap<Tile>, x: usize, y: usize, orientation: Orientation, a: RoomId, b: RoomId) -> bool {
    let (x, y) = (x as i32, y as i32);
    let (before, after) = match orientation {
        Orientation::Vertical => ((x - 1, y), (x + 1, y)),
        Orientation::Horizontal => ((x, y - 1), (x, y + 1)),
    };
    let side = |(px, py): (i32, i32)| grid.get_checked(px, py).and_then(|t| t.room_id());

    match (side(before), side(after)) {
        (Some(p), Some(q)) => (p == a && q == b) || (p == b && q == a),
        _ => false,
    }
}

/// Open one random valid run between every adjacent, non-overlapping pair.
pub fn carve_openings<R: Rng>(
    grid: &mut Tilemap<Tile>,
    rooms: &[Room],
    style: OpeningStyle,
    rng: &mut R,
) -> CarveReport {
    let mut report = CarveReport::default();

    for a in 0..rooms.len() {
        for b in (a + 1)..rooms.len() {
            if rooms[a].overlaps(&rooms[b]) {
                continue;
            }
            let (vertical, horizontal) = adjacency(&rooms[a], &rooms[b]);
            if !vertical && !horizontal {
                continue;
            }

            let candidates = find_candidates(grid, rooms, a, b, style);
            let opening = if candidates.is_empty() {
                debug!("rooms {} and {} are adjacent but share no valid run", a, b);
                None
            } else {
                let chosen = candidates[rng.gen_range(0..candidates.len())].clone();
                for (x, y) in chosen.cells() {
                    grid.set(x, y, style.tile());
                }
                debug!(
                    "opened {} between rooms {} and {} at ({}, {}) from {} candidates",
                    style, a, b, chosen.x, chosen.y, candidates.len()
                );
                Some(chosen)
            };

            report.connections.push(PairConnection {
                a,
                b,
                candidates: candidates.len(),
                opening,
            });
        }
    }

    report
}
