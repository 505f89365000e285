//! # ToolpathKit Settings
//!
//! Settings collaborator for ToolpathKit: one [`Config`] holding the raster,
//! laser, contour and transform settings records, persisted as TOML or JSON
//! and validated at load and save time.

pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, APP_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{SettingsError, SettingsResult};
