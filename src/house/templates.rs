//! Room template pools and assignment
//!
//! A template pairs a floor resource with a wall resource. The main room
//! draws from its own pool so it reads differently from the side rooms.

use log::debug;
use rand::Rng;

use crate::error::{LayoutError, PoolKind};
use crate::house::types::{Room, RoomId, Template};

/// Built-in main room pool
pub fn default_main_templates() -> Vec<Template> {
    vec![
        Template::new("great_hall", "floor_parquet", "wall_panelled"),
        Template::new("living_room", "floor_carpet_red", "wall_wallpaper_gold"),
    ]
}

/// Built-in side room pool
pub fn default_side_templates() -> Vec<Template> {
    vec![
        Template::new("kitchen", "floor_tile_checker", "wall_tile_white"),
        Template::new("bedroom", "floor_carpet_blue", "wall_wallpaper_stripe"),
        Template::new("study", "floor_wood_dark", "wall_bookshelf"),
        Template::new("storeroom", "floor_concrete", "wall_brick"),
    ]
}

/// Assign one template per room, in room order.
///
/// The main room draws uniformly from `main_pool`, every other room from
/// `side_pool`. A pool is only an error if some room needs it.
pub fn assign_templates<R: Rng>(
    room_count: usize,
    main_room: RoomId,
    main_pool: &[Template],
    side_pool: &[Template],
    rng: &mut R,
) -> Result<Vec<Template>, LayoutError> {
    let mut assigned = Vec::with_capacity(room_count);

    for id in 0..room_count {
        let (pool, kind) = if id == main_room {
            (main_pool, PoolKind::Main)
        } else {
            (side_pool, PoolKind::Side)
        };
        if pool.is_empty() {
            return Err(LayoutError::EmptyTemplatePool(kind));
        }
        let template = pool[rng.gen_range(0..pool.len())].clone();
        debug!("room {} uses template '{}'", id, template.name);
        assigned.push(template);
    }

    Ok(assigned)
}

/// The room whose integer center is closest to a cell (first room on ties).
pub fn closest_room(rooms: &[Room], x: usize, y: usize) -> Option<RoomId> {
    let mut best: Option<(RoomId, f32)> = None;
    for (id, room) in rooms.iter().enumerate() {
        let dist = room.center_distance_to(x, y);
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((id, dist));
        }
    }
    best.map(|(id, _)| id)
}

/// Template whose wall resource a wall cell at `(x, y)` should use.
pub fn wall_template_at<'a>(
    rooms: &[Room],
    templates: &'a [Template],
    x: usize,
    y: usize,
) -> Option<&'a Template> {
    closest_room(rooms, x, y).and_then(|id| templates.get(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pools_are_respected() {
        let main = vec![Template::new("main", "f", "w")];
        let side = vec![Template::new("side_a", "f", "w"), Template::new("side_b", "f", "w")];
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let assigned = assign_templates(5, 2, &main, &side, &mut rng).unwrap();
        assert_eq!(assigned.len(), 5);
        assert_eq!(assigned[2].name, "main");
        for (id, template) in assigned.iter().enumerate() {
            if id != 2 {
                assert!(template.name.starts_with("side"));
            }
        }
    }

    #[test]
    fn test_empty_main_pool_is_error() {
        let side = default_side_templates();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            assign_templates(1, 0, &[], &side, &mut rng),
            Err(LayoutError::EmptyTemplatePool(PoolKind::Main))
        );
    }

    #[test]
    fn test_empty_side_pool_only_matters_with_side_rooms() {
        let main = default_main_templates();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(assign_templates(1, 0, &main, &[], &mut rng).is_ok());
        assert_eq!(
            assign_templates(2, 0, &main, &[], &mut rng),
            Err(LayoutError::EmptyTemplatePool(PoolKind::Side))
        );
    }

    #[test]
    fn test_wall_uses_nearest_room() {
        let rooms = vec![Room::new(1, 1, 4, 4), Room::new(10, 1, 4, 4)];
        let templates = vec![Template::new("west", "f", "w1"), Template::new("east", "f", "w2")];
        assert_eq!(wall_template_at(&rooms, &templates, 5, 2).unwrap().name, "west");
        assert_eq!(wall_template_at(&rooms, &templates, 9, 2).unwrap().name, "east");
        assert!(wall_template_at(&[], &templates, 0, 0).is_none());
    }
}
