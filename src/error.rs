//! Error types for layout generation

use serde::{Deserialize, Serialize};

/// Which template pool a room draws from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolKind {
    Main,
    Side,
}

impl std::fmt::Display for PoolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolKind::Main => write!(f, "main room"),
            PoolKind::Side => write!(f, "side room"),
        }
    }
}

/// Errors that can occur while configuring or generating a layout
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Grid too small to hold the border ring plus any interior
    InvalidDimensions { width: usize, height: usize },
    /// Room size bounds are zero or inverted
    InvalidRoomSize { min: usize, max: usize },
    /// A room needed a template from a pool with no entries
    EmptyTemplatePool(PoolKind),
    /// A split was requested on a span that cannot hold two minimum rooms
    InvalidSplit { span: usize, min_room_size: usize },
    /// Partitioning produced no rooms
    NoRooms,
    /// Reading or parsing a config file failed
    ConfigFile(String),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::InvalidDimensions { width, height } => write!(
                f,
                "Invalid grid dimensions {}x{} (both must be at least {})",
                width,
                height,
                crate::config::MIN_GRID_SIZE
            ),
            LayoutError::InvalidRoomSize { min, max } => write!(
                f,
                "Invalid room size range {}..={} (min must be positive and not exceed max)",
                min, max
            ),
            LayoutError::EmptyTemplatePool(kind) => {
                write!(f, "The {} template pool is empty", kind)
            }
            LayoutError::InvalidSplit { span, min_room_size } => write!(
                f,
                "Cannot split a span of {} with minimum room size {}",
                span, min_room_size
            ),
            LayoutError::NoRooms => write!(f, "Partitioning produced no rooms"),
            LayoutError::ConfigFile(e) => write!(f, "Config file error: {}", e),
        }
    }
}

impl std::error::Error for LayoutError {}
