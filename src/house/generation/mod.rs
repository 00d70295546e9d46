//! Layout generation stages
//!
//! - BSP (Binary Space Partitioning) for room footprints
//! - Wall synthesis around stamped rooms
//! - Openings carved between adjacent rooms
//! - Spawn points on the outer wall ring

pub mod bsp;
pub mod openings;
pub mod spawners;
pub mod walls;

pub use bsp::*;
pub use openings::*;
pub use spawners::*;
pub use walls::*;
