use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use toolpathkit::commands::{
    analyze_file, contour_program, format_stats, laser_program, load_config, raster_program,
    segments_file, transform_file, write_config, write_output,
};
use toolpathkit::init_logging;
use tracing::info;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Generate, transform and inspect CNC and laser motion programs.
#[derive(Parser)]
#[command(name = "toolpathkit", version, long_version = LONG_VERSION)]
struct Cli {
    /// Config file (TOML or JSON). Defaults to the platform config location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Carve an image as a height map
    Raster {
        image: PathBuf,
        #[command(flatten)]
        scan: ScanArgs,
        /// Depth for black pixels
        #[arg(long, allow_hyphen_values = true)]
        min_z: Option<f64>,
        /// Depth for white pixels
        #[arg(long, allow_hyphen_values = true)]
        max_z: Option<f64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Engrave an image with laser power modulation
    Laser {
        image: PathBuf,
        #[command(flatten)]
        scan: ScanArgs,
        #[arg(long)]
        power_min: Option<i64>,
        #[arg(long)]
        power_max: Option<i64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Trace contours from a JSON file
    Contour {
        contours: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        cut_z: Option<f64>,
        #[arg(long)]
        passes: Option<u32>,
        #[arg(long)]
        scale: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        offset_x: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        offset_y: Option<f64>,
        /// Leave contours open instead of returning to the first point
        #[arg(long)]
        open: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Apply origin offset, axis reversal and calibration to a program
    Transform {
        program: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        origin_x: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        origin_y: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        origin_z: Option<f64>,
        /// Mirror X; `--reverse-x=false` overrides the config
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        reverse_x: Option<bool>,
        /// Mirror Y; `--reverse-y=false` overrides the config
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        reverse_y: Option<bool>,
        #[arg(long, allow_hyphen_values = true)]
        calib_x: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        calib_y: Option<f64>,
        /// Digits after the decimal point for rewritten coordinates
        #[arg(long, default_value_t = 3)]
        decimal_places: usize,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print program statistics
    Analyze {
        program: PathBuf,
        /// Emit JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
    /// Export engaged/travel path segments as JSON
    Segments {
        program: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Write the effective configuration to a file
    InitConfig {
        /// Target file; defaults to the platform config location
        path: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ScanArgs {
    /// Distance between pixels
    #[arg(long)]
    pixel_size: Option<f64>,
    /// Scan every row left to right
    #[arg(long)]
    no_serpentine: bool,
    /// Swap the intensity mapping
    #[arg(long)]
    invert: bool,
    #[arg(long)]
    feed_rate: Option<f64>,
}

#[derive(Args)]
struct OutputArgs {
    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl OutputArgs {
    fn path(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    // init-config may name a file that does not exist yet
    let allow_missing = matches!(cli.command, Command::InitConfig { .. });
    let mut config = load_config(cli.config.as_deref(), allow_missing)?;

    match cli.command {
        Command::Raster {
            image,
            scan,
            min_z,
            max_z,
            output,
        } => {
            let s = &mut config.raster;
            if let Some(v) = scan.pixel_size {
                s.pixel_size = v;
            }
            if let Some(v) = scan.feed_rate {
                s.program.feed_rate = v;
            }
            s.serpentine &= !scan.no_serpentine;
            s.invert_z ^= scan.invert;
            if let Some(v) = min_z {
                s.min_z = v;
            }
            if let Some(v) = max_z {
                s.max_z = v;
            }
            let program = raster_program(&image, s)?;
            write_output(output.path(), &program)?;
        }
        Command::Laser {
            image,
            scan,
            power_min,
            power_max,
            output,
        } => {
            let s = &mut config.laser;
            if let Some(v) = scan.pixel_size {
                s.pixel_size = v;
            }
            if let Some(v) = scan.feed_rate {
                s.program.feed_rate = v;
            }
            s.serpentine &= !scan.no_serpentine;
            s.invert ^= scan.invert;
            if let Some(v) = power_min {
                s.power_min = v;
            }
            if let Some(v) = power_max {
                s.power_max = v;
            }
            let program = laser_program(&image, s)?;
            write_output(output.path(), &program)?;
        }
        Command::Contour {
            contours,
            cut_z,
            passes,
            scale,
            offset_x,
            offset_y,
            open,
            output,
        } => {
            let s = &mut config.contour;
            if let Some(v) = cut_z {
                s.cut_z = v;
            }
            if let Some(v) = passes {
                s.passes = v;
            }
            if let Some(v) = scale {
                s.scale = v;
            }
            if let Some(v) = offset_x {
                s.offset_x = v;
            }
            if let Some(v) = offset_y {
                s.offset_y = v;
            }
            s.close_path &= !open;
            let program = contour_program(&contours, s)?;
            write_output(output.path(), &program)?;
        }
        Command::Transform {
            program,
            origin_x,
            origin_y,
            origin_z,
            reverse_x,
            reverse_y,
            calib_x,
            calib_y,
            decimal_places,
            output,
        } => {
            let t = &mut config.transform;
            for (target, value) in [
                (&mut t.origin_x, origin_x),
                (&mut t.origin_y, origin_y),
                (&mut t.origin_z, origin_z),
                (&mut t.calib_x, calib_x),
                (&mut t.calib_y, calib_y),
            ] {
                if let Some(v) = value {
                    *target = v;
                }
            }
            if let Some(v) = reverse_x {
                t.reverse_x = v;
            }
            if let Some(v) = reverse_y {
                t.reverse_y = v;
            }
            let text = transform_file(&program, t, decimal_places)?;
            write_output(output.path(), &text)?;
        }
        Command::Analyze { program, json } => {
            let stats = analyze_file(&program)?;
            if stats.is_empty() {
                info!("{} contains no motion", program.display());
            }
            let report = if json {
                let mut text = serde_json::to_string_pretty(&stats)?;
                text.push('\n');
                text
            } else {
                format_stats(&stats)
            };
            write_output(None, &report)?;
        }
        Command::Segments { program, output } => {
            let segments = segments_file(&program)?;
            let mut text = serde_json::to_string(&segments)?;
            text.push('\n');
            write_output(output.path(), &text)?;
        }
        Command::InitConfig { path } => {
            write_config(&config, path.as_deref().or(cli.config.as_deref()))?;
        }
    }

    Ok(())
}
