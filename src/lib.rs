//! # ToolpathKit
//!
//! Motion program generation and analysis for CNC carving and laser
//! engraving:
//! - Raster height-map carving and laser scanning from intensity images
//! - Contour tracing from vector outlines
//! - Coordinate transforms (origin offset, axis reversal, calibration)
//! - Program parsing, statistics and engaged/travel path reconstruction
//!
//! ## Architecture
//!
//! ToolpathKit is organized as a workspace with multiple crates:
//!
//! 1. **toolpathkit-core** - Errors, intensity fields, motion instructions, transform math
//! 2. **toolpathkit-camtools** - Raster, laser and contour generators
//! 3. **toolpathkit-visualizer** - Parser, transform pass, analyzer, segmenter
//! 4. **toolpathkit-settings** - TOML/JSON configuration
//! 5. **toolpathkit** - Command-line binary that ties the crates to files

pub mod commands;

pub use toolpathkit_camtools::{
    ContourSet, ContourTraceGenerator, ContourTraceSettings, LaserScanGenerator,
    LaserScanSettings, ProgramSettings, RasterScanGenerator, RasterScanSettings,
};
pub use toolpathkit_core::{
    transform, Axis, Contour, FieldInput, IntensityField, IntensitySource, MotionInstruction,
    ParameterError, Point2D, Result, ToolpathError, TransformSettings,
};
pub use toolpathkit_settings::{Config, ConfigFormat, SettingsError};
pub use toolpathkit_visualizer::{
    analyze, parse_program, segment_events, CommandKind, MotionEvent, PathSegment,
    ProgramStats, ProgramTransformer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatting on stderr, so program text on stdout stays clean
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
