//! Per-axis coordinate transform
//!
//! Order is fixed: reverse, then offset, then calibrate.
//! `(-10 + 5) * 1.1 = -5.5` for `origin_x = 5`, `reverse_x`, `calib_x = 0.1`.
//! Z is offset only.
//!
//! The transform is not a normalization. Applying it twice applies the
//! offset twice, so callers run it exactly once per program.

use crate::error::{ParameterError, Result};
use serde::{Deserialize, Serialize};

/// Machine axis addressed by a coordinate word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Map a parameter letter to an axis.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }
}

/// Origin offset, axis reversal and linear calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformSettings {
    pub origin_x: f64,
    pub origin_y: f64,
    pub origin_z: f64,
    pub reverse_x: bool,
    pub reverse_y: bool,
    /// Multiplicative correction: X becomes `x * (1 + calib_x)`.
    pub calib_x: f64,
    /// Multiplicative correction: Y becomes `y * (1 + calib_y)`.
    pub calib_y: f64,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            origin_z: 0.0,
            reverse_x: false,
            reverse_y: false,
            calib_x: 0.0,
            calib_y: 0.0,
        }
    }
}

impl TransformSettings {
    /// Reject non-finite offsets and calibration factors.
    pub fn validate(&self) -> Result<()> {
        ParameterError::check_finite("originX", self.origin_x)?;
        ParameterError::check_finite("originY", self.origin_y)?;
        ParameterError::check_finite("originZ", self.origin_z)?;
        ParameterError::check_finite("calibX", self.calib_x)?;
        ParameterError::check_finite("calibY", self.calib_y)?;
        Ok(())
    }

    /// True when every axis maps to itself.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    fn reversed(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.reverse_x,
            Axis::Y => self.reverse_y,
            Axis::Z => false,
        }
    }

    fn origin(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.origin_x,
            Axis::Y => self.origin_y,
            Axis::Z => self.origin_z,
        }
    }

    fn calibration(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.calib_x,
            Axis::Y => self.calib_y,
            Axis::Z => 0.0,
        }
    }
}

/// Transform one coordinate value on `axis`.
pub fn transform(value: f64, axis: Axis, settings: &TransformSettings) -> f64 {
    let mut v = value;
    if settings.reversed(axis) {
        v = -v;
    }
    v += settings.origin(axis);
    let calib = settings.calibration(axis);
    if calib != 0.0 {
        v *= 1.0 + calib;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_offset_scale_order() {
        let settings = TransformSettings {
            origin_x: 5.0,
            reverse_x: true,
            calib_x: 0.1,
            ..Default::default()
        };
        let out = transform(10.0, Axis::X, &settings);
        assert!((out - -5.5).abs() < 1e-9);
    }

    #[test]
    fn test_z_is_offset_only() {
        let settings = TransformSettings {
            origin_z: -1.0,
            reverse_x: true,
            reverse_y: true,
            calib_x: 0.5,
            calib_y: 0.5,
            ..Default::default()
        };
        assert_eq!(transform(3.0, Axis::Z, &settings), 2.0);
    }

    #[test]
    fn test_identity_default() {
        let settings = TransformSettings::default();
        assert!(settings.is_identity());
        assert_eq!(transform(12.5, Axis::Y, &settings), 12.5);
    }

    #[test]
    fn test_validate_rejects_nan() {
        let settings = TransformSettings {
            calib_y: f64::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_axis_letters() {
        assert_eq!(Axis::from_letter('x'), Some(Axis::X));
        assert_eq!(Axis::from_letter('F'), None);
        assert_eq!(Axis::Z.letter(), 'Z');
    }
}
