//! Main room selection
//!
//! The main room is the largest room, with proximity to the grid center
//! breaking area ties. It hosts the player spawn and draws from the main
//! template pool.

use crate::house::types::{Room, RoomId};

/// Pick the main room with a single linear scan.
///
/// Strictly greater area wins; on equal area the room whose integer center
/// is closer to `(grid_width / 2, grid_height / 2)` wins; on a full tie the
/// earlier room is kept. Returns `None` only for an empty room list.
pub fn select_main_room(rooms: &[Room], grid_width: usize, grid_height: usize) -> Option<RoomId> {
    let center = (grid_width / 2, grid_height / 2);

    let mut best: Option<(RoomId, usize, f32)> = None;
    for (id, room) in rooms.iter().enumerate() {
        let area = room.area();
        let dist = room.center_distance_to(center.0, center.1);

        let better = match best {
            None => true,
            Some((_, best_area, best_dist)) => {
                area > best_area || (area == best_area && dist < best_dist)
            }
        };
        if better {
            best = Some((id, area, dist));
        }
    }

    best.map(|(id, _, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_largest_area_wins() {
        let rooms = vec![
            Room::new(1, 1, 4, 4),
            Room::new(10, 10, 6, 6),
            Room::new(20, 1, 5, 5),
        ];
        assert_eq!(select_main_room(&rooms, 40, 30), Some(1));
    }

    #[test]
    fn test_area_tie_prefers_center() {
        // Grid center (20, 15)
        let rooms = vec![
            Room::new(1, 1, 6, 6),
            Room::new(17, 12, 6, 6),
            Room::new(30, 20, 6, 6),
        ];
        assert_eq!(select_main_room(&rooms, 40, 30), Some(1));
    }

    #[test]
    fn test_full_tie_keeps_first() {
        // Mirror images around the center: same area, same distance
        let rooms = vec![Room::new(10, 12, 4, 4), Room::new(26, 12, 4, 4)];
        let d0 = rooms[0].center_distance_to(20, 15);
        let d1 = rooms[1].center_distance_to(20, 15);
        assert_eq!(d0, d1);
        assert_eq!(select_main_room(&rooms, 40, 30), Some(0));
    }

    #[test]
    fn test_empty_and_stable() {
        assert_eq!(select_main_room(&[], 40, 30), None);
        let rooms = vec![Room::new(1, 1, 3, 7), Room::new(5, 5, 7, 3)];
        let first = select_main_room(&rooms, 20, 20);
        for _ in 0..10 {
            assert_eq!(select_main_room(&rooms, 20, 20), first);
        }
    }
}
