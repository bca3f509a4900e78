//! Adjacency and distance queries over cube space
//!
//! Orientation-independent: the six unit directions are the same for every
//! grid variant, and their order is fixed so that dependent algorithms
//! (pathfinding tie-breaking in particular) stay deterministic.

use super::coords::CubeCoord;

/// The six cube-space unit directions, in fixed iteration order.
pub const CUBE_DIRECTIONS: [CubeCoord; 6] = [
    CubeCoord { q: 1, r: -1, s: 0 },
    CubeCoord { q: 1, r: 0, s: -1 },
    CubeCoord { q: 0, r: 1, s: -1 },
    CubeCoord { q: -1, r: 1, s: 0 },
    CubeCoord { q: -1, r: 0, s: 1 },
    CubeCoord { q: 0, r: -1, s: 1 },
];

/// The six adjacent cells, in [`CUBE_DIRECTIONS`] order. The input is
/// normalized first, so a non-zero-sum triple yields six valid cells.
pub fn neighbors(cube: CubeCoord) -> [CubeCoord; 6] {
    let cube = cube.normalized();
    CUBE_DIRECTIONS.map(|d| cube + d)
}

/// Distance in hex steps: half the L1 norm of the cube delta. The s-axis
/// delta is derived from q and r, so a stored `s` violating the zero-sum
/// invariant cannot skew the result.
pub fn cube_distance(a: CubeCoord, b: CubeCoord) -> i32 {
    let dq = (a.q - b.q).abs();
    let dr = (a.r - b.r).abs();
    let ds = ((a.q + a.r) - (b.q + b.r)).abs();
    (dq + dr + ds) / 2
}
