//! Vector Contour Tracing Tool
//!
//! Converts an ordered contour set into a motion program that traces each
//! outline at a fixed cutting depth, optionally over several passes.
//! Contour order is preserved: it is the order the outlines are cut in.

use crate::common::ProgramSettings;
use serde::{Deserialize, Serialize};
use toolpathkit_core::{write_program, Contour, MotionInstruction, ParameterError, Point2D, Result};
use tracing::debug;

/// Ordered set of contours handed over by the vision side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContourSet(pub Vec<Contour>);

impl ContourSet {
    /// Parse `[[[x, y], ...], ...]`.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn contours(&self) -> &[Contour] {
        &self.0
    }

    /// Total number of points across all contours.
    pub fn point_count(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }
}

impl From<Vec<Contour>> for ContourSet {
    fn from(contours: Vec<Contour>) -> Self {
        Self(contours)
    }
}

/// Contour tracing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContourTraceSettings {
    #[serde(flatten)]
    pub program: ProgramSettings,
    /// Cutting depth
    pub cut_z: f64,
    /// Number of times each contour is traced
    pub passes: u32,
    /// Scale applied to contour coordinates before offsetting
    pub scale: f64,
    /// X offset added after scaling
    pub offset_x: f64,
    /// Y offset added after scaling
    pub offset_y: f64,
    /// Return to the first point at the end of every pass
    pub close_path: bool,
}

impl Default for ContourTraceSettings {
    fn default() -> Self {
        Self {
            program: ProgramSettings::default(),
            cut_z: -1.0,
            passes: 1,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            close_path: true,
        }
    }
}

impl ContourTraceSettings {
    pub fn validate(&self) -> Result<()> {
        self.program.validate()?;
        ParameterError::check_finite("cutZ", self.cut_z)?;
        ParameterError::check_finite("scale", self.scale)?;
        ParameterError::check_finite("offsetX", self.offset_x)?;
        ParameterError::check_finite("offsetY", self.offset_y)?;
        if self.scale == 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "scale".to_string(),
                reason: "must be non-zero".to_string(),
            }
            .into());
        }
        if self.passes == 0 {
            return Err(ParameterError::InvalidValue {
                name: "passes".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Scale and offset every point, rejecting any that leaves the finite range.
    fn place(&self, contour_index: usize, contour: &[Point2D]) -> Result<Vec<Point2D>> {
        contour
            .iter()
            .enumerate()
            .map(|(i, p)| -> Result<Point2D> {
                let placed = p.scaled_offset(self.scale, self.offset_x, self.offset_y);
                let name = format!("contour {} point {}", contour_index, i);
                ParameterError::check_finite(&name, placed.x)?;
                ParameterError::check_finite(&name, placed.y)?;
                Ok(placed)
            })
            .collect()
    }
}

/// Contour tracing generator
pub struct ContourTraceGenerator {
    settings: ContourTraceSettings,
}

impl ContourTraceGenerator {
    pub fn new(settings: ContourTraceSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ContourTraceSettings {
        &self.settings
    }

    /// Generate G-code tracing every contour in order
    pub fn generate(&self, contours: &[Contour]) -> Result<String> {
        let instructions = self.instructions(contours)?;
        Ok(write_program(
            &instructions,
            self.settings.program.decimal_places,
        ))
    }

    /// Build the instruction list without serializing it
    pub fn instructions(&self, contours: &[Contour]) -> Result<Vec<MotionInstruction>> {
        self.settings.validate()?;

        let s = &self.settings;
        debug!(
            "Contour trace: {} contours, {} passes, cut z {:.3}, scale {:.3}",
            contours.len(),
            s.passes,
            s.cut_z,
            s.scale
        );

        let placed = contours
            .iter()
            .enumerate()
            .map(|(i, contour)| s.place(i, contour))
            .collect::<Result<Vec<_>>>()?;

        let mut out: Vec<MotionInstruction> = s.program.header_instructions().collect();
        out.push(MotionInstruction::feed_rate(s.program.feed_rate));
        out.push(MotionInstruction::rapid_z(s.program.safe_z));

        let mut skipped = 0usize;
        for contour in &placed {
            let Some((&start, rest)) = contour.split_first() else {
                skipped += 1;
                continue;
            };

            out.push(MotionInstruction::rapid_xy(start.x, start.y));

            for pass in 0..s.passes {
                // An open path ends away from its start; return before retracing.
                if pass > 0 && !s.close_path && !rest.is_empty() {
                    out.push(MotionInstruction::rapid_xy(start.x, start.y));
                }

                out.push(MotionInstruction::linear_z(s.cut_z));
                for p in rest {
                    out.push(MotionInstruction::linear_xy(p.x, p.y));
                }
                if s.close_path {
                    out.push(MotionInstruction::linear_xy(start.x, start.y));
                }
                out.push(MotionInstruction::rapid_z(s.program.safe_z));
            }
        }

        if skipped > 0 {
            debug!("Skipped {} empty contours", skipped);
        }

        out.extend(s.program.footer_instructions());
        Ok(out)
    }
}
