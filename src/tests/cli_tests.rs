//! # Command Line Tests
//!
//! Argument parsing and configuration loading for the binary.

use crate::{load_config, parse_args, Args};
use chrono::NaiveDate;
use moon_clock_lib::config::Config;
use std::fs;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn args(list: &[&str]) -> anyhow::Result<Args> {
    parse_args(list.iter().map(|s| s.to_string()))
}

#[test]
fn no_arguments_gives_defaults() {
    assert_eq!(args(&[]).unwrap(), Args::default());
}

#[test]
fn all_flags_are_parsed() {
    let parsed = args(&[
        "--config", "sky.toml", "--date", "2020-06-04", "--days", "3", "--json",
    ])
    .unwrap();

    assert_eq!(parsed.config, Some(PathBuf::from("sky.toml")));
    assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2020, 6, 4));
    assert_eq!(parsed.days, Some(3));
    assert!(parsed.json);
    assert!(!parsed.help);
}

#[test]
fn bad_arguments_are_rejected() {
    assert!(args(&["--days", "many"]).is_err());
    assert!(args(&["--date", "June 4th"]).is_err());
    assert!(args(&["--config"]).is_err());
    assert!(args(&["--stdout"]).is_err());
}

#[test]
fn days_override_applies_to_config() {
    let file = NamedTempFile::new().expect("Should create temp file");
    Config::default()
        .save_to_path(file.path())
        .expect("Should write config");

    let parsed = Args {
        config: Some(file.path().to_path_buf()),
        days: Some(2),
        ..Args::default()
    };
    let config = load_config(&parsed).expect("Should load config");
    assert_eq!(config.forecast.days, 2);
}

#[test]
fn missing_default_config_falls_back_to_defaults() {
    // Tests run from the package root, which carries no moon-config.toml
    let parsed = Args {
        days: Some(3),
        ..Args::default()
    };
    let config = load_config(&parsed).expect("Should fall back to defaults");
    assert_eq!(config.observer.name, Config::default().observer.name);
    assert_eq!(config.forecast.days, 3);
}

#[test]
fn explicit_config_must_exist() {
    let parsed = Args {
        config: Some(PathBuf::from("/nonexistent/moon-config.toml")),
        ..Args::default()
    };
    assert!(load_config(&parsed).is_err());
}

#[test]
fn explicit_config_must_be_valid() {
    let file = NamedTempFile::new().expect("Should create temp file");
    let mut config = Config::default();
    config.observer.latitude = 123.0;
    fs::write(file.path(), toml::to_string(&config).unwrap()).unwrap();

    let parsed = Args {
        config: Some(file.path().to_path_buf()),
        ..Args::default()
    };
    let error = load_config(&parsed).unwrap_err();
    assert!(format!("{error:#}").contains("latitude"));
}
