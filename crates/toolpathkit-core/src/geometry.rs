//! Geometry value types shared by generators and consumers

use serde::{Deserialize, Serialize};

/// A point in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale about the origin, then translate.
    pub fn scaled_offset(&self, scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self::new(self.x * scale + offset_x, self.y * scale + offset_y)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

/// Ordered points of one traced outline.
pub type Contour = Vec<Point2D>;
