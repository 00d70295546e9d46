//! Procedural house layout library
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod export;
pub mod house;
pub mod logging;
pub mod tilemap;
pub mod verify;

pub use config::LayoutConfig;
pub use error::LayoutError;
pub use house::{generate_layout, generate_layout_from_seed, Layout};
