//! Offset and cube coordinate systems, and pixel-space conversion
//!
//! Offset coordinates (`row`/`col`) are what scene documents store; cube
//! coordinates (`q`/`r`/`s` with `q + r + s == 0`) are what adjacency and
//! distance math runs on. The grid is conceptually unbounded, so negative
//! rows and columns are valid everywhere.

use derive_more::{Add, Sub};
use serde::{Deserialize, Serialize};

use super::config::{GridConfig, GridVariant};
use crate::core::types::Point;

/// Three-axis hex coordinate, invariant `q + r + s == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Add, Sub, Serialize, Deserialize)]
pub struct CubeCoord {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl CubeCoord {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Accepts a full triple from a caller. A triple violating the zero-sum
    /// invariant is normalized by recomputing `s = -q - r` rather than
    /// rejected, matching the fix-up used by cube rounding.
    pub fn from_qrs(q: i32, r: i32, s: i32) -> Self {
        if q + r + s == 0 {
            Self { q, r, s }
        } else {
            Self::new(q, r)
        }
    }

    pub fn is_valid(&self) -> bool {
        self.q + self.r + self.s == 0
    }

    /// Recompute `s = -q - r`. The fields are public, so ingestion
    /// boundaries (cell construction, adjacency, pathfinding) apply this
    /// instead of trusting a caller-built triple.
    pub fn normalized(self) -> Self {
        Self::new(self.q, self.r)
    }
}

/// Row/column hex coordinate used for storage and indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Add, Sub, Serialize, Deserialize)]
pub struct OffsetCoord {
    pub row: i32,
    pub col: i32,
}

impl OffsetCoord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Convert an offset coordinate to cube space.
///
/// Integer arithmetic only: `x & 1` is the parity bit (also for negative
/// values in two's complement), and every division below has an even
/// numerator, so no truncation error is possible.
pub fn offset_to_cube(offset: OffsetCoord, config: &GridConfig) -> CubeCoord {
    let OffsetCoord { row, col } = offset;
    match config.variant() {
        GridVariant::OddRows => CubeCoord::new(col - (row - (row & 1)) / 2, row),
        GridVariant::EvenRows => CubeCoord::new(col - (row + (row & 1)) / 2, row),
        GridVariant::OddColumns => CubeCoord::new(col, row - (col - (col & 1)) / 2),
        GridVariant::EvenColumns => CubeCoord::new(col, row - (col + (col & 1)) / 2),
    }
}

/// Exact inverse of [`offset_to_cube`] for all valid cube coordinates.
pub fn cube_to_offset(cube: CubeCoord, config: &GridConfig) -> OffsetCoord {
    let CubeCoord { q, r, .. } = cube;
    match config.variant() {
        GridVariant::OddRows => OffsetCoord::new(r, q + (r - (r & 1)) / 2),
        GridVariant::EvenRows => OffsetCoord::new(r, q + (r + (r & 1)) / 2),
        GridVariant::OddColumns => OffsetCoord::new(r + (q - (q & 1)) / 2, q),
        GridVariant::EvenColumns => OffsetCoord::new(r + (q + (q & 1)) / 2, q),
    }
}

// Center position in axial terms. Rows of pointy-top hexes overlap
// vertically by a quarter cell (3/4 stagger along the principal axis);
// the parity shift folds into a constant half-cell term, which is why a
// single formula covers both parities per orientation.
fn parity_shift(config: &GridConfig) -> f64 {
    if config.parity_even {
        1.0
    } else {
        0.5
    }
}

/// Center pixel position of a hex cell.
pub fn cube_to_center(cube: CubeCoord, config: &GridConfig) -> Point {
    let q = cube.q as f64;
    let r = cube.r as f64;
    let shift = parity_shift(config);
    if config.columnar {
        Point::new(
            config.cell_width * (0.75 * q + 0.5),
            config.cell_height * (r + q / 2.0 + shift),
        )
    } else {
        Point::new(
            config.cell_width * (q + r / 2.0 + shift),
            config.cell_height * (0.75 * r + 0.5),
        )
    }
}

/// Top-left pixel position of a hex cell's bounding box.
pub fn cube_to_top_left(cube: CubeCoord, config: &GridConfig) -> Point {
    let center = cube_to_center(cube, config);
    Point::new(
        center.x - config.cell_width / 2.0,
        center.y - config.cell_height / 2.0,
    )
}

pub fn offset_to_center(offset: OffsetCoord, config: &GridConfig) -> Point {
    cube_to_center(offset_to_cube(offset, config), config)
}

pub fn offset_to_top_left(offset: OffsetCoord, config: &GridConfig) -> Point {
    cube_to_top_left(offset_to_cube(offset, config), config)
}

/// Cube coordinate of the hex containing a pixel point.
pub fn pixel_to_cube(point: Point, config: &GridConfig) -> CubeCoord {
    let (qf, rf) = pixel_to_fractional(point, config);
    cube_round(qf, rf)
}

/// Inverse of the affine center map, producing fractional axial coordinates.
pub(crate) fn pixel_to_fractional(point: Point, config: &GridConfig) -> (f64, f64) {
    let shift = parity_shift(config);
    if config.columnar {
        let qf = (point.x / config.cell_width - 0.5) / 0.75;
        let rf = point.y / config.cell_height - shift - qf / 2.0;
        (qf, rf)
    } else {
        let rf = (point.y / config.cell_height - 0.5) / 0.75;
        let qf = point.x / config.cell_width - shift - rf / 2.0;
        (qf, rf)
    }
}

/// Round fractional cube coordinates to the containing hex.
///
/// Rounding q, r, s independently can leave `q + r + s != 0` near cell
/// boundaries. The axis with the largest rounding error is the one that
/// crossed a boundary, so that axis is recomputed as the negative sum of
/// the other two. Rounding each axis and keeping all three would return
/// a coordinate that names no hex at all.
pub(crate) fn cube_round(qf: f64, rf: f64) -> CubeCoord {
    let sf = -qf - rf;
    let mut q = qf.round();
    let mut r = rf.round();
    let mut s = sf.round();

    let dq = (q - qf).abs();
    let dr = (r - rf).abs();
    let ds = (s - sf).abs();

    if dq > dr && dq > ds {
        q = -r - s;
    } else if dr > ds {
        r = -q - s;
    } else {
        s = -q - r;
    }
    CubeCoord {
        q: q as i32,
        r: r as i32,
        s: s as i32,
    }
}
