use serde::{Deserialize, Serialize};

/// Orthogonal neighbor offsets (left, right, up, down).
pub const DIR_OFFSETS_4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A bounded 2D grid stored row-major (`y * width + x`).
///
/// Unlike a world map this grid does not wrap: coordinates outside
/// `[0, width) x [0, height)` simply do not exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({}, {}) out of bounds", x, y);
        y * self.width + x
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    /// Signed lookup; `None` when the coordinate is off the grid.
    pub fn get_checked(&self, x: i32, y: i32) -> Option<&T> {
        if self.in_bounds(x, y) {
            Some(self.get(x as usize, y as usize))
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// In-bounds 4-connected neighbors (left, right, up, down order).
    pub fn neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(4);
        for (dx, dy) in DIR_OFFSETS_4 {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if self.in_bounds(nx, ny) {
                result.push((nx as usize, ny as usize));
            }
        }
        result
    }

    /// Whether the cell sits on the outermost ring of the grid.
    pub fn on_outer_ring(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Iterate over all cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    pub fn count_where(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.data.iter().filter(|v| pred(v)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let mut map = Tilemap::new_with(4, 3, 0u8);
        map.set(3, 1, 7);
        let (x, y, v) = map.iter().find(|(_, _, v)| **v == 7).unwrap();
        assert_eq!((x, y, *v), (3, 1, 7));
        assert_eq!(map.iter().position(|(_, _, v)| *v == 7), Some(1 * 4 + 3));
    }

    #[test]
    fn test_no_wrapping_at_edges() {
        let map: Tilemap<u8> = Tilemap::new(5, 5);
        assert_eq!(map.neighbors(0, 0), vec![(1, 0), (0, 1)]);
        assert_eq!(map.neighbors(4, 4).len(), 2);
        assert_eq!(map.neighbors(2, 2).len(), 4);
        assert!(map.get_checked(-1, 0).is_none());
        assert!(map.get_checked(0, 5).is_none());
        assert!(map.get_checked(4, 4).is_some());
    }

    #[test]
    fn test_outer_ring() {
        let map: Tilemap<u8> = Tilemap::new(6, 4);
        assert!(map.on_outer_ring(0, 2));
        assert!(map.on_outer_ring(5, 2));
        assert!(map.on_outer_ring(3, 0));
        assert!(map.on_outer_ring(3, 3));
        assert!(!map.on_outer_ring(1, 1));
        assert!(!map.on_outer_ring(4, 2));
    }
}
