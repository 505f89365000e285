//! Configuration file handling
//!
//! A [`Config`] groups the settings record of every generator plus the
//! coordinate transform. Files are TOML or JSON, chosen by extension.
//! Missing keys fall back to defaults, so a partial file is valid.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toolpathkit_camtools::{ContourTraceSettings, LaserScanSettings, RasterScanSettings};
use toolpathkit_core::{ToolpathError, TransformSettings};
use tracing::{debug, info};

/// Directory name under the platform config dir.
pub const APP_DIR_NAME: &str = "toolpathkit";
/// File name of the default config.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// On-disk config format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

fn invalid(section: &'static str) -> impl FnOnce(ToolpathError) -> SettingsError {
    move |source| SettingsError::Invalid { section, source }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Raster height-map carving
    pub raster: RasterScanSettings,
    /// Laser raster engraving
    pub laser: LaserScanSettings,
    /// Contour tracing
    pub contour: ContourTraceSettings,
    /// Coordinate transform for existing programs
    pub transform: TransformSettings,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/toolpathkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("platform config directory not found".to_string())
            })
    }

    /// Validate every section; the first failure names its section.
    pub fn validate(&self) -> SettingsResult<()> {
        self.raster.validate().map_err(invalid("raster"))?;
        self.laser.validate().map_err(invalid("laser"))?;
        self.contour.validate().map_err(invalid("contour"))?;
        self.transform.validate().map_err(invalid("transform"))?;
        Ok(())
    }

    /// Parse config text in the given format and validate it.
    pub fn from_str_as(text: &str, format: ConfigFormat) -> SettingsResult<Self> {
        let config: Self = match format {
            ConfigFormat::Toml => toml::from_str(text)?,
            ConfigFormat::Json => serde_json::from_str(text)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize in the given format.
    pub fn to_string_as(&self, format: ConfigFormat) -> SettingsResult<String> {
        Ok(match format {
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Load config from file (JSON or TOML)
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str_as(&content, format)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path`, or defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;
        let content = self.to_string_as(format)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/config.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.JSON")).unwrap(),
            ConfigFormat::Json
        );
        assert!(matches!(
            ConfigFormat::from_path(Path::new("config.yaml")),
            Err(SettingsError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
        assert!(ConfigFormat::from_path(Path::new("config")).is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let text = r#"
[raster]
pixelSize = 0.25
minZ = -3.0

[transform]
originX = 5.0
reverseX = true
"#;
        let config = Config::from_str_as(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.raster.pixel_size, 0.25);
        assert_eq!(config.raster.min_z, -3.0);
        assert_eq!(config.raster.program.feed_rate, 1000.0);
        assert!(config.transform.reverse_x);
        assert_eq!(config.laser, LaserScanSettings::default());
    }

    #[test]
    fn test_flattened_program_keys() {
        let text = r#"{"contour": {"feedRate": 250.0, "passes": 3, "footer": ["M2"]}}"#;
        let config = Config::from_str_as(text, ConfigFormat::Json).unwrap();
        assert_eq!(config.contour.program.feed_rate, 250.0);
        assert_eq!(config.contour.passes, 3);
        assert_eq!(config.contour.program.footer, vec!["M2".to_string()]);
    }

    #[test]
    fn test_invalid_section_is_named() {
        let text = r#"{"laser": {"pixelSize": -1.0}}"#;
        let err = Config::from_str_as(text, ConfigFormat::Json).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                section: "laser",
                ..
            }
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.raster.serpentine = false;
        config.contour.close_path = false;
        config.transform.calib_y = -0.02;

        let text = config.to_string_as(ConfigFormat::Toml).unwrap();
        let back = Config::from_str_as(&text, ConfigFormat::Toml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_default_path_file_name() {
        if let Ok(path) = Config::default_path() {
            assert!(path.ends_with("toolpathkit/config.toml"));
        }
    }
}
