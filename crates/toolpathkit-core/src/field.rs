//! Intensity field accessor
//!
//! Normalizes the two raster shapes handed over by the vision side into one
//! sampling interface:
//! - interleaved multi-channel 8-bit samples (RGB, RGBA, ...), reduced to luminance
//! - a pre-normalized scalar buffer, read as-is
//!
//! Fields borrow the caller's buffer and never copy it.

use crate::error::{Result, ToolpathError};

/// Luminance weights applied to the first three channels of packed input.
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// A 2-D grid of intensities in `[0, 1]`.
///
/// `sample` must be defined for every `x < width()`, `y < height()` and must
/// return the same value for the same coordinates.
pub trait IntensitySource {
    /// Number of columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Intensity at column `x`, row `y`. Values are not clamped here.
    fn sample(&self, x: usize, y: usize) -> f32;
}

/// Raster shapes accepted by [`IntensityField::from_input`].
#[derive(Debug, Clone, Copy)]
pub enum FieldInput<'a> {
    /// Interleaved 8-bit samples, `channels` per pixel, row-major.
    Packed {
        data: &'a [u8],
        width: usize,
        height: usize,
        channels: usize,
    },
    /// One pre-normalized value per pixel, row-major.
    Scalar {
        data: &'a [f32],
        width: usize,
        height: usize,
    },
}

#[derive(Debug, Clone, Copy)]
enum Samples<'a> {
    Packed { data: &'a [u8], channels: usize },
    Scalar(&'a [f32]),
}

/// Immutable view over caller-owned raster data.
#[derive(Debug, Clone, Copy)]
pub struct IntensityField<'a> {
    width: usize,
    height: usize,
    samples: Samples<'a>,
}

impl<'a> IntensityField<'a> {
    /// Build a field from either supported input shape.
    pub fn from_input(input: FieldInput<'a>) -> Result<Self> {
        match input {
            FieldInput::Packed {
                data,
                width,
                height,
                channels,
            } => Self::from_packed(data, width, height, channels),
            FieldInput::Scalar {
                data,
                width,
                height,
            } => Self::from_scalar(data, width, height),
        }
    }

    /// View an interleaved buffer; intensity is the luminance of the first
    /// three channels divided by 255.
    pub fn from_packed(data: &'a [u8], width: usize, height: usize, channels: usize) -> Result<Self> {
        if channels < 3 {
            return Err(ToolpathError::unsupported(format!(
                "packed input needs at least 3 channels, got {}",
                channels
            )));
        }
        let expected = pixel_count(width, height)?
            .checked_mul(channels)
            .ok_or_else(|| ToolpathError::unsupported("packed buffer size overflows"))?;
        if data.len() != expected {
            return Err(ToolpathError::unsupported(format!(
                "packed buffer length {} does not match {}x{}x{}",
                data.len(),
                width,
                height,
                channels
            )));
        }

        Ok(Self {
            width,
            height,
            samples: Samples::Packed { data, channels },
        })
    }

    /// View a scalar buffer already normalized to `[0, 1]`.
    pub fn from_scalar(data: &'a [f32], width: usize, height: usize) -> Result<Self> {
        let expected = pixel_count(width, height)?;
        if data.len() != expected {
            return Err(ToolpathError::unsupported(format!(
                "scalar buffer length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }

        Ok(Self {
            width,
            height,
            samples: Samples::Scalar(data),
        })
    }

    /// True when the field has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl IntensitySource for IntensityField<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn sample(&self, x: usize, y: usize) -> f32 {
        let idx = y * self.width + x;
        match self.samples {
            Samples::Packed { data, channels } => {
                let base = idx * channels;
                let r = data[base] as f32;
                let g = data[base + 1] as f32;
                let b = data[base + 2] as f32;
                (LUMA_R * r + LUMA_G * g + LUMA_B * b) / 255.0
            }
            Samples::Scalar(data) => data[idx],
        }
    }
}

/// Clamp an intensity to `[0, 1]`; NaN reads as 0.
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn pixel_count(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or_else(|| ToolpathError::unsupported("field dimensions overflow"))
}
