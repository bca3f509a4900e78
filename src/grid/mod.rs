//! Hexagonal grid subsystem
//!
//! Coordinate conversion, adjacency, pathfinding, and pixel snapping.
//! Everything here is a pure function over an immutable [`config::GridConfig`];
//! no component retains grid state of its own.

pub mod cell;
pub mod config;
pub mod coords;
pub mod neighbors;
pub mod path;
pub mod snap;

pub use cell::HexCell;
pub use config::{GridConfig, GridVariant};
pub use coords::{CubeCoord, OffsetCoord};
