//! # ToolpathKit Visualizer
//!
//! Motion program parsing, transformation, and analysis for ToolpathKit.
//! Turns program text into [`MotionEvent`]s, rewrites coordinates through a
//! [`TransformSettings`](toolpathkit_core::TransformSettings), computes
//! [`ProgramStats`], and rebuilds engaged/travel [`PathSegment`]s for display.

pub mod gcode;
pub mod visualizer;

pub use gcode::{
    analyze, parse_line, parse_program, transform_program, CommandKind, MotionEvent,
    ProgramStats, ProgramTransformer, DEFAULT_DECIMAL_PLACES,
};
pub use visualizer::{
    segment_events, segments_bounds, Bounds, PathSegment, PathSegmenter, ENGAGE_EPSILON,
};
