//! # ToolpathKit Core
//!
//! Core types, errors, and coordinate math for ToolpathKit.
//! Provides the intensity field accessor, the motion instruction model with
//! its fixed-decimal serializer, and the per-axis coordinate transform.

pub mod error;
pub mod field;
pub mod geometry;
pub mod program;
pub mod transform;

pub use error::{ParameterError, Result, ToolpathError};
pub use field::{clamp_unit, FieldInput, IntensityField, IntensitySource};
pub use geometry::{Contour, Point2D};
pub use program::{
    expand_templates, format_fixed, write_program, MotionInstruction, LINEAR_WORD, RAPID_WORD,
    SAFE_Z_PLACEHOLDER,
};
pub use transform::{transform, Axis, TransformSettings};
