//! Hexfield - hexagonal grid coordinates, snapping, and pathfinding
//!
//! Pure value types and stateless functions over a shared [`GridConfig`].
//! The scene that owns the configuration also owns persistence and
//! rendering; this crate only produces coordinates, neighbor sets, paths,
//! and snapped pixel positions.

pub mod core;
pub mod grid;

pub use crate::core::error::{GridError, Result};
pub use crate::core::types::Point;
pub use grid::cell::HexCell;
pub use grid::config::{GridConfig, GridVariant};
pub use grid::coords::{
    cube_to_center, cube_to_offset, cube_to_top_left, offset_to_center, offset_to_cube,
    offset_to_top_left, pixel_to_cube, CubeCoord, OffsetCoord,
};
pub use grid::neighbors::{cube_distance, neighbors, CUBE_DIRECTIONS};
pub use grid::path::{find_path, find_path_weighted, Path, PathResult, SearchBudget};
pub use grid::snap::{closest_vertex, shift_position, snap_footprint, snap_point, RoundingMode};
