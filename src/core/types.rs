//! Core type definitions used throughout the crate

use derive_more::{Add, Sub};
use serde::{Deserialize, Serialize};

/// 2D pixel position
#[derive(Debug, Clone, Copy, Default, PartialEq, Add, Sub, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
