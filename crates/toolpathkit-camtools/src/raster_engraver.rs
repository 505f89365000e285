//! Raster Height-Map Carving Tool
//!
//! Converts an intensity field to a motion program by scanning it row by row
//! and mapping each pixel's intensity to a cutting depth.
//! Row 0 is emitted first; pixel `(x, y)` lands at `(x * pixel_size, y * pixel_size)`.

use crate::common::{check_scan_extent, lerp, row_columns, ProgramSettings};
use serde::{Deserialize, Serialize};
use toolpathkit_core::{
    clamp_unit, write_program, IntensitySource, MotionInstruction, ParameterError, Result,
};
use tracing::{debug, trace};

/// Raster scan parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RasterScanSettings {
    #[serde(flatten)]
    pub program: ProgramSettings,
    /// Distance between neighbouring pixels
    pub pixel_size: f64,
    /// Alternate scan direction on every row
    pub serpentine: bool,
    /// Map intensity 0 to `max_z` and 1 to `min_z` instead
    pub invert_z: bool,
    /// Depth for intensity 0
    pub min_z: f64,
    /// Depth for intensity 1
    pub max_z: f64,
}

impl Default for RasterScanSettings {
    fn default() -> Self {
        Self {
            program: ProgramSettings::default(),
            pixel_size: 0.5,
            serpentine: true,
            invert_z: false,
            min_z: -2.0,
            max_z: 0.0,
        }
    }
}

impl RasterScanSettings {
    pub fn validate(&self) -> Result<()> {
        self.program.validate()?;
        ParameterError::check_positive("pixelSize", self.pixel_size)?;
        ParameterError::check_finite("minZ", self.min_z)?;
        ParameterError::check_finite("maxZ", self.max_z)?;
        ParameterError::check_finite("maxZ - minZ", self.max_z - self.min_z)?;
        Ok(())
    }

    /// Depth for a raw intensity sample.
    pub fn depth_for(&self, intensity: f32) -> f64 {
        let v = clamp_unit(intensity) as f64;
        let v = if self.invert_z { 1.0 - v } else { v };
        lerp(self.min_z, self.max_z, v)
    }
}

/// Raster carving generator
pub struct RasterScanGenerator {
    settings: RasterScanSettings,
}

impl RasterScanGenerator {
    pub fn new(settings: RasterScanSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RasterScanSettings {
        &self.settings
    }

    /// Generate the motion program text
    pub fn generate(&self, field: &impl IntensitySource) -> Result<String> {
        self.generate_with_progress(field, |_| {})
    }

    /// Generate the motion program text, reporting row progress in `[0, 1]`
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
            "Raster scan {}x{} px, pixel {:.3}, z {:.3}..{:.3}, serpentine={}",
            width, height, s.pixel_size, s.min_z, s.max_z, s.serpentine
        );

        let mut out: Vec<MotionInstruction> = s.program.header_instructions().collect();

        if width > 0 && height > 0 {
            out.reserve(height * (width + 2) + 2);
            out.push(MotionInstruction::feed_rate(s.program.feed_rate));
            out.push(MotionInstruction::rapid_z(s.program.safe_z));

            for y in 0..height {
                let y_pos = y as f64 * s.pixel_size;
                let mut columns = row_columns(width, y, s.serpentine).peekable();

                if let Some(&first) = columns.peek() {
                    out.push(MotionInstruction::rapid_xyz(
                        first as f64 * s.pixel_size,
                        y_pos,
                        s.program.safe_z,
                    ));
                }

                for x in columns {
                    let z = s.depth_for(field.sample(x, y));
                    out.push(MotionInstruction::linear_xyz(
                        x as f64 * s.pixel_size,
                        y_pos,
                        z,
                    ));
                }

                out.push(MotionInstruction::rapid_z(s.program.safe_z));

                trace!("Raster row {} of {} done", y + 1, height);
                progress_callback((y + 1) as f32 / height as f32);
            }
        }

        out.extend(s.program.footer_instructions());
        debug!("Raster scan produced {} instructions", out.len());
        Ok(out)
    }
}
