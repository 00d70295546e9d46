//! Layout types and definitions
//!
//! Defines the tile vocabulary of the house grid, the room rectangles produced
//! by partitioning, and the cosmetic templates assigned to rooms.

use serde::{Deserialize, Serialize};

/// Index of a room in the layout's room list
pub type RoomId = usize;

/// State of a single grid cell. Exactly one state per cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Unassigned space (outside every room and wall)
    #[default]
    Empty,
    /// Interior floor of the room with this index
    Room(RoomId),
    /// Wall enclosing one or more rooms
    Wall,
    /// Carved opening between two rooms; was a wall, now passable
    Gap,
    /// Single-cell opening marker (door opening style only)
    Door,
    /// Outer wall promoted to an enemy spawn point
    Spawner,
}

impl Tile {
    pub fn is_room(&self) -> bool {
        matches!(self, Tile::Room(_))
    }

    pub fn room_id(&self) -> Option<RoomId> {
        match self {
            Tile::Room(id) => Some(*id),
            _ => None,
        }
    }

    /// Cells a walker can stand on once the layout is built
    pub fn is_passable(&self) -> bool {
        matches!(self, Tile::Room(_) | Tile::Gap | Tile::Door)
    }

    /// Cells that close off a room edge (spawners are promoted walls)
    pub fn is_barrier(&self) -> bool {
        matches!(self, Tile::Wall | Tile::Spawner)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tile::Empty => "Empty",
            Tile::Room(_) => "Room",
            Tile::Wall => "Wall",
            Tile::Gap => "Gap",
            Tile::Door => "Door",
            Tile::Spawner => "Spawner",
        }
    }
}

/// An axis-aligned room rectangle. `x_max`/`y_max` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    pub fn x_max(&self) -> usize {
        self.x + self.width
    }

    pub fn y_max(&self) -> usize {
        self.y + self.height
    }

    /// Integer center, truncated toward the origin
    pub fn center(&self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Exact geometric center, used for player placement
    pub fn center_f32(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, px: usize, py: usize) -> bool {
        px >= self.x && px < self.x_max() && py >= self.y && py < self.y_max()
    }

    /// True when the two rectangles share at least one cell
    pub fn overlaps(&self, other: &Room) -> bool {
        self.x < other.x_max()
            && other.x < self.x_max()
            && self.y < other.y_max()
            && other.y < self.y_max()
    }

    /// All cells of the room, row-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y..self.y_max()).flat_map(move |y| (self.x..self.x_max()).map(move |x| (x, y)))
    }

    /// Euclidean distance between integer centers and a point
    pub fn center_distance_to(&self, px: usize, py: usize) -> f32 {
        let (cx, cy) = self.center();
        let dx = cx as f32 - px as f32;
        let dy = cy as f32 - py as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A cosmetic floor/wall resource pair assigned to a room
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    /// Symbolic floor resource reference
    pub floor: String,
    /// Symbolic wall resource reference
    pub wall: String,
}

impl Template {
    pub fn new(name: &str, floor: &str, wall: &str) -> Self {
        Self {
            name: name.to_string(),
            floor: floor.to_string(),
            wall: wall.to_string(),
        }
    }
}

/// Direction of the wall line shared by two adjacent rooms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Rooms side by side; the shared wall is a column
    Vertical,
    /// Rooms stacked; the shared wall is a row
    Horizontal,
}

impl Orientation {
    /// Unit step along the wall line
    pub fn along(&self) -> (usize, usize) {
        match self {
            Orientation::Vertical => (0, 1),
            Orientation::Horizontal => (1, 0),
        }
    }
}

/// How connectivity openings are cut into shared walls
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningStyle {
    /// Two-cell-wide open gap
    #[default]
    Gap,
    /// Single door cell, handed to the consumer as a door marker
    Door,
}

impl OpeningStyle {
    /// Number of consecutive wall cells one opening consumes
    pub fn run_length(&self) -> usize {
        match self {
            OpeningStyle::Gap => 2,
            OpeningStyle::Door => 1,
        }
    }

    pub fn tile(&self) -> Tile {
        match self {
            OpeningStyle::Gap => Tile::Gap,
            OpeningStyle::Door => Tile::Door,
        }
    }
}

impl std::fmt::Display for OpeningStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpeningStyle::Gap => write!(f, "gap"),
            OpeningStyle::Door => write!(f, "door"),
        }
    }
}

/// An opening cut into the wall between two rooms
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    /// First cell of the run (top-most or left-most)
    pub x: usize,
    pub y: usize,
    pub orientation: Orientation,
    pub length: usize,
}

impl Opening {
    pub fn cells(&self) -> Vec<(usize, usize)> {
        let (dx, dy) = self.orientation.along();
        (0..self.length)
            .map(|i| (self.x + dx * i, self.y + dy * i))
            .collect()
    }
}
