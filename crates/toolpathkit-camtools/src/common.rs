//! Settings and helpers shared by every generator

use serde::{Deserialize, Serialize};
use toolpathkit_core::{expand_templates, MotionInstruction, ParameterError, Result};

/// Largest accepted `decimal_places`.
pub const MAX_DECIMAL_PLACES: usize = 9;

/// Options every generation mode recognizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgramSettings {
    /// Feed rate for linear moves (units/min)
    pub feed_rate: f64,
    /// Retract height between cuts
    pub safe_z: f64,
    /// Digits after the decimal point for every coordinate
    pub decimal_places: usize,
    /// Lines emitted verbatim before any motion
    pub header: Vec<String>,
    /// Lines emitted after all motion; `{safeZ}` is substituted
    pub footer: Vec<String>,
}

impl Default for ProgramSettings {
    fn default() -> Self {
        Self {
            feed_rate: 1000.0,
            safe_z: 5.0,
            decimal_places: 3,
            header: vec!["G21".to_string(), "G90".to_string()],
            footer: vec!["G0 Z{safeZ}".to_string(), "M30".to_string()],
        }
    }
}

impl ProgramSettings {
    pub fn validate(&self) -> Result<()> {
        ParameterError::check_positive("feedRate", self.feed_rate)?;
        ParameterError::check_finite("safeZ", self.safe_z)?;
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ParameterError::OutOfRange {
                name: "decimalPlaces".to_string(),
                value: self.decimal_places as f64,
                min: 0.0,
                max: MAX_DECIMAL_PLACES as f64,
            }
            .into());
        }
        Ok(())
    }

    pub(crate) fn header_instructions(&self) -> impl Iterator<Item = MotionInstruction> + '_ {
        self.header.iter().cloned().map(MotionInstruction::Raw)
    }

    pub(crate) fn footer_instructions(&self) -> Vec<MotionInstruction> {
        expand_templates(&self.footer, self.safe_z, self.decimal_places)
    }
}

/// Column visiting order for one scan row.
///
/// With `serpentine`, even rows run left to right and odd rows right to left.
pub fn row_columns(width: usize, row: usize, serpentine: bool) -> Box<dyn Iterator<Item = usize>> {
    if serpentine && row % 2 == 1 {
        Box::new((0..width).rev())
    } else {
        Box::new(0..width)
    }
}

/// Reject a scan whose far edge would not be a finite coordinate.
pub(crate) fn check_scan_extent(pixel_size: f64, width: usize, height: usize) -> Result<()> {
    let span = width.max(height).saturating_sub(1) as f64;
    ParameterError::check_finite("pixelSize extent", pixel_size * span)?;
    Ok(())
}

/// Linear interpolation from `lo` to `hi` by `t`.
pub(crate) fn lerp(lo: f64, hi: f64, t: f64) -> f64 {
    lo + t * (hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_columns_serpentine() {
        assert_eq!(row_columns(3, 0, true).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(row_columns(3, 1, true).collect::<Vec<_>>(), vec![2, 1, 0]);
        assert_eq!(row_columns(3, 1, false).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(row_columns(0, 1, true).count(), 0);
    }

    #[test]
    fn test_validate_common() {
        assert!(ProgramSettings::default().validate().is_ok());

        let settings = ProgramSettings {
            feed_rate: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = ProgramSettings {
            safe_z: f64::INFINITY,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = ProgramSettings {
            decimal_places: 12,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_scan_extent() {
        assert!(check_scan_extent(0.5, 100, 20).is_ok());
        assert!(check_scan_extent(f64::MAX, 1, 1).is_ok());
        assert!(check_scan_extent(f64::MAX, 3, 1).is_err());
        assert!(check_scan_extent(f64::MAX, 0, 0).is_ok());
    }

    #[test]
    fn test_footer_substitution() {
        let settings = ProgramSettings {
            safe_z: 7.5,
            decimal_places: 2,
            ..Default::default()
        };
        let footer = settings.footer_instructions();
        assert_eq!(footer[0], MotionInstruction::Raw("G0 Z7.50".to_string()));
    }
}
