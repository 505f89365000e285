//! File-level operations behind the command-line interface
//!
//! Each function reads its input from disk, runs one engine operation and
//! returns the result; writing is left to [`write_output`].

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use toolpathkit_camtools::{
    ContourSet, ContourTraceGenerator, ContourTraceSettings, LaserScanGenerator,
    LaserScanSettings, RasterScanGenerator, RasterScanSettings,
};
use toolpathkit_core::{IntensityField, TransformSettings};
use toolpathkit_settings::Config;
use toolpathkit_visualizer::{
    analyze, parse_program, segment_events, PathSegment, ProgramStats, ProgramTransformer,
};
use tracing::{debug, info, warn};

/// Load the config named on the command line, or the platform default.
///
/// A named file must exist unless `allow_missing` is set, in which case a
/// file that is not there yet yields the defaults.
pub fn load_config(explicit: Option<&Path>, allow_missing: bool) -> Result<Config> {
    if let Some(path) = explicit {
        let loaded = if allow_missing {
            Config::load_or_default(path)
        } else {
            Config::load(path)
        };
        return loaded.with_context(|| format!("Failed to load config {}", path.display()));
    }
    match Config::default_path() {
        Ok(path) => Config::load_or_default(&path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        Err(e) => {
            warn!("{}; using defaults", e);
            Ok(Config::default())
        }
    }
}

/// Write `config` to `path`, or to the platform default location.
pub fn write_config(config: &Config, path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    config
        .save(&path)
        .with_context(|| format!("Failed to save config {}", path.display()))?;
    info!("Config written to {}", path.display());
    Ok(path)
}

/// Decoded image as an interleaved RGB buffer.
pub struct RgbBuffer {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl RgbBuffer {
    pub fn field(&self) -> Result<IntensityField<'_>> {
        Ok(IntensityField::from_packed(
            &self.data,
            self.width,
            self.height,
            3,
        )?)
    }
}

/// Decode any image format the `image` crate reads.
pub fn load_image(path: &Path) -> Result<RgbBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    info!("Loaded {}x{} image from {}", width, height, path.display());
    Ok(RgbBuffer {
        data: img.into_raw(),
        width: width as usize,
        height: height as usize,
    })
}

/// Load a contour set from a JSON file of `[[[x, y], ...], ...]`.
pub fn load_contours(path: &Path) -> Result<ContourSet> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read contours {}", path.display()))?;
    let set = ContourSet::from_json(&text)
        .with_context(|| format!("Invalid contour JSON in {}", path.display()))?;
    info!(
        "Loaded {} contours ({} points) from {}",
        set.contours().len(),
        set.point_count(),
        path.display()
    );
    Ok(set)
}

pub fn read_program(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read program {}", path.display()))
}

/// Log progress at every tenth of the way.
fn progress_logger(label: &'static str) -> impl FnMut(f32) {
    let mut next = 0.1f32;
    move |fraction| {
        if fraction >= next {
            debug!("{}: {:.0}%", label, fraction * 100.0);
            while next <= fraction {
                next += 0.1;
            }
        }
    }
}

pub fn raster_program(image: &Path, settings: &RasterScanSettings) -> Result<String> {
    let buffer = load_image(image)?;
    let field = buffer.field()?;
    let program = RasterScanGenerator::new(settings.clone())
        .generate_with_progress(&field, progress_logger("Raster"))?;
    Ok(program)
}

pub fn laser_program(image: &Path, settings: &LaserScanSettings) -> Result<String> {
    let buffer = load_image(image)?;
    let field = buffer.field()?;
    let program = LaserScanGenerator::new(settings.clone())
        .generate_with_progress(&field, progress_logger("Laser"))?;
    Ok(program)
}

pub fn contour_program(contours: &Path, settings: &ContourTraceSettings) -> Result<String> {
    let set = load_contours(contours)?;
    Ok(ContourTraceGenerator::new(settings.clone()).generate(set.contours())?)
}

pub fn transform_file(
    program: &Path,
    settings: &TransformSettings,
    decimal_places: usize,
) -> Result<String> {
    let text = read_program(program)?;
    let transformer = ProgramTransformer::new(settings.clone())
        .context("Invalid transform settings")?
        .with_decimal_places(decimal_places);
    Ok(transformer.transform_program(&text))
}

pub fn analyze_file(program: &Path) -> Result<ProgramStats> {
    let text = read_program(program)?;
    let events = parse_program(&text)
        .with_context(|| format!("Failed to parse {}", program.display()))?;
    Ok(analyze(&events))
}

pub fn segments_file(program: &Path) -> Result<Vec<PathSegment>> {
    let text = read_program(program)?;
    let events = parse_program(&text)
        .with_context(|| format!("Failed to parse {}", program.display()))?;
    Ok(segment_events(&events))
}

/// Human-readable statistics report.
pub fn format_stats(stats: &ProgramStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("Lines:           {}\n", stats.total_events));
    out.push_str(&format!(
        "Moves:           {} ({} rapid, {} linear)\n",
        stats.motion_events, stats.rapid_moves, stats.linear_moves
    ));
    out.push_str(&format!(
        "Travel:          {:.3} ({:.3} rapid, {:.3} linear)\n",
        stats.travel_distance, stats.rapid_distance, stats.linear_distance
    ));
    out.push_str(&format!(
        "Z range:         {:.3} .. {:.3}\n",
        stats.min_z, stats.max_z
    ));
    if let Some(b) = &stats.bounds {
        out.push_str(&format!(
            "XY extent:       X {:.3} .. {:.3}, Y {:.3} .. {:.3}\n",
            b.min_x, b.max_x, b.min_y, b.max_y
        ));
    }
    out
}

/// Write to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
