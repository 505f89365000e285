//! Bounding box accumulator for motion endpoints and segments.

use glam::DVec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    /// Empty bounds; invalid until the first `update`.
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            min_z: f64::INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    pub fn update(&mut self, p: DVec3) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
        self.min_z = self.min_z.min(p.z);
        self.max_z = self.max_z.max(p.z);
    }

    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
            && self.min_z.is_finite()
            && self.max_z.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
            && self.min_z <= self.max_z
    }

    /// Extent along each axis, zero when nothing was recorded.
    pub fn size(&self) -> DVec3 {
        if !self.is_valid() {
            return DVec3::ZERO;
        }
        DVec3::new(
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.max_z - self.min_z,
        )
    }

    /// `Some(self)` once at least one point was recorded.
    pub fn finalize(self) -> Option<Self> {
        self.is_valid().then_some(self)
    }
}

impl FromIterator<DVec3> for Bounds {
    fn from_iter<I: IntoIterator<Item = DVec3>>(iter: I) -> Self {
        let mut bounds = Self::new();
        for p in iter {
            bounds.update(p);
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds_invalid() {
        let b = Bounds::new();
        assert!(!b.is_valid());
        assert_eq!(b.size(), DVec3::ZERO);
        assert!(b.finalize().is_none());
    }

    #[test]
    fn test_update_tracks_extent() {
        let b: Bounds = [DVec3::new(1.0, -2.0, 0.0), DVec3::new(4.0, 2.0, -1.0)]
            .into_iter()
            .collect();
        assert!(b.is_valid());
        assert_eq!(b.size(), DVec3::new(3.0, 4.0, 1.0));
        assert_eq!(b.min_z, -1.0);
    }
}
