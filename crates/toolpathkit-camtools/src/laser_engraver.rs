//! Laser Image Engraving Tool
//!
//! Converts an intensity field to a motion program for laser engraving using
//! raster scanning. Intensity modulates laser power (`S` word); the head
//! stays in the XY plane, so no Z motion is emitted.
//! Laser enable/disable commands come from the header/footer templates.

use crate::common::{check_scan_extent, lerp, row_columns, ProgramSettings};
use serde::{Deserialize, Serialize};
use toolpathkit_core::{
    clamp_unit, write_program, IntensitySource, MotionInstruction, ParameterError, Result,
};
use tracing::{debug, trace};

/// Laser engraving parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LaserScanSettings {
    #[serde(flatten)]
    pub program: ProgramSettings,
    /// Distance between neighbouring pixels
    pub pixel_size: f64,
    /// Use bidirectional scanning
    pub serpentine: bool,
    /// Invert image (dark becomes light, light becomes dark)
    pub invert: bool,
    /// Power for intensity 0
    pub power_min: i64,
    /// Power for intensity 1
    pub power_max: i64,
}

impl Default for LaserScanSettings {
    fn default() -> Self {
        Self {
            program: ProgramSettings {
                header: vec!["G21".to_string(), "G90".to_string(), "M4 S0".to_string()],
                footer: vec!["M5".to_string(), "M30".to_string()],
                ..ProgramSettings::default()
            },
            pixel_size: 0.1,
            serpentine: true,
            invert: false,
            power_min: 0,
            power_max: 1000,
        }
    }
}

impl LaserScanSettings {
    pub fn validate(&self) -> Result<()> {
        self.program.validate()?;
        ParameterError::check_positive("pixelSize", self.pixel_size)?;
        Ok(())
    }

    /// Convert pixel intensity to laser power. The cast saturates.
    pub fn power_for(&self, intensity: f32) -> i64 {
        let v = clamp_unit(intensity) as f64;
        let v = if self.invert { 1.0 - v } else { v };
        lerp(self.power_min as f64, self.power_max as f64, v).round() as i64
    }
}

/// Laser engraving generator for intensity fields
pub struct LaserScanGenerator {
    settings: LaserScanSettings,
}

impl LaserScanGenerator {
    pub fn new(settings: LaserScanSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LaserScanSettings {
        &self.settings
    }

    /// Generate G-code for laser engraving
    pub fn generate(&self, field: &impl IntensitySource) -> Result<String> {
        self.generate_with_progress(field, |_| {})
    }

    /// Generate G-code for laser engraving with progress callback
    pub fn generate_with_progress<F>(
        &self,
        field: &impl IntensitySource,
        progress_callback: F,
    ) -> Result<String>
    where
        F: FnMut(f32),
    {
        let instructions = self.instructions_with_progress(field, progress_callback)?;
        Ok(write_program(
            &instructions,
            self.settings.program.decimal_places,
        ))
    }

    /// Build the instruction list without serializing it
    pub fn instructions(&self, field: &impl IntensitySource) -> Result<Vec<MotionInstruction>> {
        self.instructions_with_progress(field, |_| {})
    }

    fn instructions_with_progress<F>(
        &self,
        field: &impl IntensitySource,
        mut progress_callback: F,
    ) -> Result<Vec<MotionInstruction>>
    where
        F: FnMut(f32),
    {
        self.settings.validate()?;

        let s = &self.settings;
        let (width, height) = (field.width(), field.height());
        check_scan_extent(s.pixel_size, width, height)?;
        debug!(
            "Laser scan {}x{} px, pixel {:.3}, power {}..{}, invert={}",
            width, height, s.pixel_size, s.power_min, s.power_max, s.invert
        );

        let mut out: Vec<MotionInstruction> = s.program.header_instructions().collect();

        if width > 0 && height > 0 {
            out.reserve(height * (width + 1) + 1);
            out.push(MotionInstruction::feed_rate(s.program.feed_rate));

            for y in 0..height {
                let y_pos = y as f64 * s.pixel_size;
                let mut columns = row_columns(width, y, s.serpentine).peekable();

                if let Some(&first) = columns.peek() {
                    out.push(MotionInstruction::rapid_xy(first as f64 * s.pixel_size, y_pos));
                }

                for x in columns {
                    out.push(MotionInstruction::Linear {
                        x: Some(x as f64 * s.pixel_size),
                        y: Some(y_pos),
                        z: None,
                        feed: None,
                        power: Some(s.power_for(field.sample(x, y))),
                    });
                }

                trace!("Laser row {} of {} done", y + 1, height);
                progress_callback((y + 1) as f32 / height as f32);
            }
        }

        out.extend(s.program.footer_instructions());
        debug!("Laser scan produced {} instructions", out.len());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolpathkit_core::IntensityField;

    #[test]
    fn test_power_mapping() {
        let s = LaserScanSettings {
            power_min: 100,
            power_max: 900,
            ..Default::default()
        };
        assert_eq!(s.power_for(0.0), 100);
        assert_eq!(s.power_for(1.0), 900);
        assert_eq!(s.power_for(0.5), 500);

        let inverted = LaserScanSettings { invert: true, ..s };
        assert_eq!(inverted.power_for(0.0), 900);
    }

    #[test]
    fn test_no_z_motion() {
        let data = [0.0, 0.5, 1.0, 0.25];
        let field = IntensityField::from_scalar(&data, 2, 2).unwrap();
        let gcode = LaserScanGenerator::new(LaserScanSettings::default())
            .generate(&field)
            .unwrap();

        assert!(!gcode.contains('Z'));
        assert!(gcode.starts_with("G21\nG90\nM4 S0\nG1 F1000.000\n"));
        assert!(gcode.contains("G0 X0.000 Y0.000\nG1 X0.000 Y0.000 S0\nG1 X0.100 Y0.000 S500\n"));
        assert!(gcode.contains("G0 X0.100 Y0.100\nG1 X0.100 Y0.100 S250\nG1 X0.000 Y0.100 S1000\n"));
        assert!(gcode.ends_with("M5\nM30\n"));
    }

    #[test]
    fn test_empty_field_header_footer_only() {
        let field = IntensityField::from_scalar(&[], 0, 4).unwrap();
        let gcode = LaserScanGenerator::new(LaserScanSettings::default())
            .generate(&field)
            .unwrap();
        assert_eq!(gcode, "G21\nG90\nM4 S0\nM5\nM30\n");
    }
}
