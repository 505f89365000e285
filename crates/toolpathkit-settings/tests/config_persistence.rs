use tempfile::TempDir;
use toolpathkit_settings::{Config, SettingsError};

fn sample_config() -> Config {
    let mut config = Config::default();
    config.raster.pixel_size = 0.2;
    config.raster.invert_z = true;
    config.laser.power_max = 255;
    config.contour.passes = 4;
    config.transform.origin_x = 12.5;
    config.transform.reverse_y = true;
    config
}

#[test]
fn test_save_and_load_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = sample_config();
    config.save(&path).unwrap();
    assert!(path.exists(), "save should create parent directories");

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_save_and_load_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let config = sample_config();
    config.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"pixelSize\""), "keys should be camelCase: {}", text);

    assert_eq!(Config::load(&path).unwrap(), config);
}

#[test]
fn test_load_or_default_missing_file() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_config_not_saved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.transform.calib_x = f64::NAN;

    assert!(matches!(
        config.save(&path),
        Err(SettingsError::Invalid {
            section: "transform",
            ..
        })
    ));
    assert!(!path.exists());
}

#[test]
fn test_load_rejects_bad_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[contour]\npasses = 0\n").unwrap();

    assert!(matches!(
        Config::load(&path),
        Err(SettingsError::Invalid {
            section: "contour",
            ..
        })
    ));
}

#[test]
fn test_load_reports_parse_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Config::load(&path), Err(SettingsError::JsonError(_))));
}
