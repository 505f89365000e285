//! # ToolpathKit CAM Tools
//!
//! Motion program generators for ToolpathKit. Each tool turns a geometric or
//! intensity input into an ordered list of motion instructions and serializes
//! it with fixed decimal places.
//!
//! ## CAM Tools Included
//!
//! - **Raster Engraver**: Height-map carving, intensity mapped to cutting depth
//! - **Vector Engraver**: Contour tracing at a fixed depth, multi-pass
//! - **Laser Engraver**: Raster scanning with intensity mapped to laser power
//!
//! Settings are plain values validated before generation starts; a rejected
//! setting never yields partial output.

pub mod common;
pub mod laser_engraver;
pub mod raster_engraver;
pub mod vector_engraver;

pub use common::{row_columns, ProgramSettings, MAX_DECIMAL_PLACES};
pub use laser_engraver::{LaserScanGenerator, LaserScanSettings};
pub use raster_engraver::{RasterScanGenerator, RasterScanSettings};
pub use vector_engraver::{ContourSet, ContourTraceGenerator, ContourTraceSettings};
