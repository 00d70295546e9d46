//! Binary Space Partitioning (BSP) for house room layouts
//!
//! Recursively splits the house interior into leaf rectangles and places one
//! room inside each leaf, always leaving a free cell before the leaf's far
//! edge so neighbouring rooms end up separated by a wall line.

use log::debug;
use rand::Rng;

use crate::error::LayoutError;
use crate::house::types::Room;

/// Room edge bounds used while partitioning
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomSizeRange {
    pub min: usize,
    pub max: usize,
}

/// The region handed to the partitioner: the grid minus its outer ring.
pub fn house_interior(width: usize, height: usize) -> Room {
    Room::new(1, 1, width.saturating_sub(2), height.saturating_sub(2))
}

/// Recursively partition `space`, appending one room per leaf to `rooms`.
///
/// Rooms are appended in the order leaves are reached (first half before
/// second half), so a room's index is its emission order.
pub fn partition<R: Rng>(
    space: Room,
    depth: u32,
    sizes: RoomSizeRange,
    rng: &mut R,
    rooms: &mut Vec<Room>,
) -> Result<(), LayoutError> {
    let min_split = sizes.min.saturating_mul(2);
    if depth == 0 || space.width < min_split || space.height < min_split {
        match place_room(space, sizes, rng) {
            Some(room) => {
                debug!("bsp leaf {:?} -> room {:?}", space, room);
                rooms.push(room);
            }
            None => debug!("bsp leaf {:?} too thin for a room, skipped", space),
        }
        return Ok(());
    }

    // Split the longer axis; a square cuts vertically
    if space.width >= space.height {
        let split_x = split_offset(space.width, sizes.min, rng)?;
        let left = Room::new(space.x, space.y, split_x, space.height);
        let right = Room::new(space.x + split_x, space.y, space.width - split_x, space.height);
        partition(left, depth - 1, sizes, rng, rooms)?;
        partition(right, depth - 1, sizes, rng, rooms)?;
    } else {
        let split_y = split_offset(space.height, sizes.min, rng)?;
        let top = Room::new(space.x, space.y, space.width, split_y);
        let bottom = Room::new(space.x, space.y + split_y, space.width, space.height - split_y);
        partition(top, depth - 1, sizes, rng, rooms)?;
        partition(bottom, depth - 1, sizes, rng, rooms)?;
    }

    Ok(())
}

/// Pick a split offset in `[min_size, span - min_size)`, so the second half
/// is always wider than `min_size` unless `span` is exactly twice it.
pub fn split_offset<R: Rng>(span: usize, min_size: usize, rng: &mut R) -> Result<usize, LayoutError> {
    if span < min_size.saturating_mul(2) {
        return Err(LayoutError::InvalidSplit {
            span,
            min_room_size: min_size,
        });
    }
    let upper = span - min_size;
    if upper == min_size {
        return Ok(min_size);
    }
    Ok(rng.gen_range(min_size..upper))
}

/// Place a room inside a leaf. `None` when the leaf cannot fit a room plus
/// its one-cell margin on some axis.
fn place_room<R: Rng>(space: Room, sizes: RoomSizeRange, rng: &mut R) -> Option<Room> {
    if space.width < 2 || space.height < 2 {
        return None;
    }

    let width = pick_extent(space.width, sizes, rng);
    let height = pick_extent(space.height, sizes, rng);

    let x = space.x + rng.gen_range(0..space.width - width);
    let y = space.y + rng.gen_range(0..space.height - height);

    Some(Room::new(x, y, width, height))
}

/// Room edge in `[min, max]`, capped at `span - 1`. When the cap is below
/// `min` the room shrinks to the cap instead of failing.
fn pick_extent<R: Rng>(span: usize, sizes: RoomSizeRange, rng: &mut R) -> usize {
    let cap = sizes.max.min(span - 1);
    let low = sizes.min.min(cap);
    rng.gen_range(low..=cap)
}
