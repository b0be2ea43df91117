//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::MeshDetail;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_climasim_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, climasim_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[globe]
detail = "high"
rotation_speed = 12.5

[palette]
ocean = "#102030"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.globe.detail, MeshDetail::High);
    assert!((config.globe.rotation_speed - 12.5).abs() < 1e-9);
    assert_eq!(config.palette.ocean, "#102030");
    // Defaults preserved
    assert_eq!(config.palette.ice, "#e6f2ff");
    assert_eq!(config.textures.day, "earth_day.jpg");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, climasim_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_keeps_parsed_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[climate]
start_year = 3000
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.climate.start_year, 3000);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("climasim").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.globe.detail, MeshDetail::Ultra);
    assert_eq!(config.climate.start_year, 2024);
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_template_parses_to_defaults() {
    let content = super::template::default_config_toml();
    let config: crate::schema::ClimaSimConfig = toml::from_str(&content).unwrap();
    assert_eq!(config.textures.seed, 0x00C1_1A5E);
    assert!(config.globe.atmosphere_pass);
}

#[test]
fn default_config_path_ends_with_climasim() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("climasim/config.toml"));
    }
}
