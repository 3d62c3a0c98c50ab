// src/utils/geometry.rs

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A world-space position, in tile units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An integer tile coordinate. Used both for template-local tiles
/// (0..16 on each axis, y = 0 at the bottom) and for world tile origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePoint {
    pub x: i32,
    pub y: i32,
}

impl TilePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offsets this point by `dx`/`dy` tiles.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn to_point(&self) -> Point2D {
        Point2D::new(self.x as f64, self.y as f64)
    }
}

impl Add for TilePoint {
    type Output = TilePoint;

    fn add(self, rhs: TilePoint) -> TilePoint {
        TilePoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}
