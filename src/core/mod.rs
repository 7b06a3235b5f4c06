//! Fundamental coordinate types.
//!
//! The grid has two coordinate frames:
//!
//! - [`GridCoord`]: integer cell indices into the tile map
//! - [`WorldPoint`]: continuous world-space position (cell index scaled by
//!   the map's cell size)

mod point;

pub use point::{GridCoord, WorldPoint};
