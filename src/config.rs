//! Configuration for house layout generation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::house::templates::{default_main_templates, default_side_templates};
use crate::house::types::{OpeningStyle, Template};

/// Smallest grid edge: the border ring on both sides plus a 2-cell interior.
pub const MIN_GRID_SIZE: usize = 4;

/// Parameters for one generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Grid width in cells (default: 40).
    pub width: usize,

    /// Grid height in cells (default: 30).
    pub height: usize,

    /// Smallest room edge the partitioner aims for.
    pub min_room_size: usize,

    /// Largest room edge the partitioner will emit.
    pub max_room_size: usize,

    /// BSP recursion budget; depth `d` yields at most `2^d` rooms.
    pub partition_depth: u32,

    /// Cap on spawn points promoted from the outer wall ring.
    pub max_spawners: usize,

    /// Templates the main room draws from.
    pub main_room_templates: Vec<Template>,

    /// Templates every other room draws from.
    pub side_room_templates: Vec<Template>,

    /// Whether adjacent rooms are joined by open gaps or door cells.
    pub opening_style: OpeningStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            min_room_size: 6,
            max_room_size: 12,
            partition_depth: 4,
            max_spawners: 4,
            main_room_templates: default_main_templates(),
            side_room_templates: default_side_templates(),
            opening_style: OpeningStyle::Gap,
        }
    }
}

impl LayoutConfig {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let text = fs::read_to_string(path)
            .map_err(|e| LayoutError::ConfigFile(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(text).map_err(|e| LayoutError::ConfigFile(e.to_string()))
    }

    /// Check the geometric parameters. Template pools are checked lazily by
    /// the assigner, since a pool is only an error when a room needs it.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width < MIN_GRID_SIZE || self.height < MIN_GRID_SIZE {
            return Err(LayoutError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.min_room_size == 0 || self.min_room_size > self.max_room_size {
            return Err(LayoutError::InvalidRoomSize {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        Ok(())
    }

    /// Upper bound on the number of rooms this config can produce.
    pub fn max_rooms(&self) -> usize {
        1usize.checked_shl(self.partition_depth).unwrap_or(usize::MAX)
    }
}
