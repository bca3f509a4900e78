//! Pixel snapping for drag-and-drop placement and keyboard movement
//!
//! Maps arbitrary pixel points (and multi-cell token footprints) onto
//! grid-aligned placements. All functions are stateless and parameterized
//! by the grid configuration.

use serde::{Deserialize, Serialize};

use super::cell::corners;
use super::config::GridConfig;
use super::coords::{
    self, cube_round, cube_to_center, cube_to_offset, offset_to_center, pixel_to_cube, CubeCoord,
    OffsetCoord,
};
use crate::core::types::Point;

/// How to resolve a point that sits ambiguously between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingMode {
    Round,
    Floor,
    Ceil,
}

/// Snap a pixel point to the center of a grid cell.
pub fn snap_point(point: Point, config: &GridConfig, mode: RoundingMode) -> Point {
    let (qf, rf) = coords::pixel_to_fractional(point, config);
    let cube = match mode {
        RoundingMode::Round => cube_round(qf, rf),
        RoundingMode::Floor => CubeCoord::new(qf.floor() as i32, rf.floor() as i32),
        RoundingMode::Ceil => CubeCoord::new(qf.ceil() as i32, rf.ceil() as i32),
    };
    cube_to_center(cube, config)
}

/// Snap a point carrying a multi-cell footprint.
///
/// Odd footprints align their center with a cell center; even footprints
/// align their bounding edges with the grid, landing on the nearest hex
/// vertex instead. The asymmetry governs how same-size and larger tokens
/// visually sit on the grid, so the two results intentionally differ for
/// the same input point. A zero footprint is treated as even.
pub fn snap_footprint(point: Point, config: &GridConfig, footprint_cells: u32) -> Point {
    let cube = pixel_to_cube(point, config);
    let center = cube_to_center(cube, config);
    if footprint_cells % 2 == 1 {
        center
    } else {
        closest_vertex(point, center, config)
    }
}

/// Nearest of the six corner vertices of the cell centered at `center`.
pub fn closest_vertex(point: Point, center: Point, config: &GridConfig) -> Point {
    let mut best = center;
    let mut best_distance = f64::INFINITY;
    for vertex in corners(center, config) {
        let d = point.distance(&vertex);
        if d < best_distance {
            best_distance = d;
            best = vertex;
        }
    }
    best
}

/// Move a pixel position by whole grid rows/columns.
///
/// A naive pixel delta is wrong across staggered rows, so the move routes
/// through offset space and reapplies the original sub-cell offset.
pub fn shift_position(point: Point, config: &GridConfig, delta_row: i32, delta_col: i32) -> Point {
    let cube = pixel_to_cube(point, config);
    let from_center = cube_to_center(cube, config);
    let offset = cube_to_offset(cube, config);
    let shifted = offset + OffsetCoord::new(delta_row, delta_col);
    let to_center = offset_to_center(shifted, config);
    point + (to_center - from_center)
}
