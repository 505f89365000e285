//! Path reconstruction for the rendering side

pub mod bounds;
pub mod segments;

pub use bounds::Bounds;
pub use segments::{segment_events, segments_bounds, PathSegment, PathSegmenter, ENGAGE_EPSILON};
