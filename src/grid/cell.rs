//! A hex cell as a derived value: cube and offset coordinates plus pixel
//! geometry for one configuration. Recomputed on demand, never cached.

use serde::{Deserialize, Serialize};

use super::config::GridConfig;
use super::coords::{
    cube_to_center, cube_to_offset, cube_to_top_left, offset_to_cube, pixel_to_cube, CubeCoord,
    OffsetCoord,
};
use super::neighbors;
use crate::core::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexCell {
    pub cube: CubeCoord,
    pub offset: OffsetCoord,
    pub config: GridConfig,
}

impl HexCell {
    pub fn from_cube(cube: CubeCoord, config: &GridConfig) -> Self {
        let cube = cube.normalized();
        Self {
            cube,
            offset: cube_to_offset(cube, config),
            config: *config,
        }
    }

    pub fn from_offset(offset: OffsetCoord, config: &GridConfig) -> Self {
        Self {
            cube: offset_to_cube(offset, config),
            offset,
            config: *config,
        }
    }

    /// The cell containing a pixel point.
    pub fn at_point(point: Point, config: &GridConfig) -> Self {
        Self::from_cube(pixel_to_cube(point, config), config)
    }

    pub fn center(&self) -> Point {
        cube_to_center(self.cube, &self.config)
    }

    pub fn top_left(&self) -> Point {
        cube_to_top_left(self.cube, &self.config)
    }

    /// The six corner points of the cell polygon, in fixed order. Flat-top
    /// cells start at the right corner, pointy-top cells at the lower-right
    /// one (screen space, y down).
    pub fn vertices(&self) -> [Point; 6] {
        corners(self.center(), &self.config)
    }

    pub fn neighbors(&self) -> [HexCell; 6] {
        neighbors::neighbors(self.cube).map(|c| HexCell::from_cube(c, &self.config))
    }
}

// Corner offsets as fractions of cell width/height. These are the vertices
// of the tiling cell defined by the affine center map (side corners at the
// half extent, the slanted corners at a quarter of it), so adjacent cells
// share corners exactly. Legacy squashed cells get squashed polygons from
// the same table.
const FLAT_CORNERS: [(f64, f64); 6] = [
    (0.5, 0.0),
    (0.25, 0.5),
    (-0.25, 0.5),
    (-0.5, 0.0),
    (-0.25, -0.5),
    (0.25, -0.5),
];
const POINTY_CORNERS: [(f64, f64); 6] = [
    (0.5, 0.25),
    (0.0, 0.5),
    (-0.5, 0.25),
    (-0.5, -0.25),
    (0.0, -0.5),
    (0.5, -0.25),
];

/// Corner points of the cell centered at `center`.
pub fn corners(center: Point, config: &GridConfig) -> [Point; 6] {
    let table = if config.columnar {
        &FLAT_CORNERS
    } else {
        &POINTY_CORNERS
    };
    std::array::from_fn(|k| {
        let (fx, fy) = table[k];
        Point::new(
            center.x + fx * config.cell_width,
            center.y + fy * config.cell_height,
        )
    })
}
