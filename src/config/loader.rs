use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::{BenchmarkDescription, RunnerConfig};

/// Default config filenames checked when `--config` is not given.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["sweepbench.toml", "sweepbench.json"];

/// Loads the runner configuration from the provided path or default locations.
///
/// # Errors
///
/// Returns an error when no config file is found or it cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> AppResult<RunnerConfig> {
    if let Some(path) = path {
        return load_config_file(path);
    }

    for candidate in DEFAULT_CONFIG_FILES {
        let candidate = PathBuf::from(candidate);
        if candidate.exists() {
            return load_config_file(&candidate);
        }
    }

    Err(AppError::config(ConfigError::MissingConfig))
}

/// Loads a runner configuration file, dispatching on its extension.
///
/// # Errors
///
/// Returns an error when the file cannot be read, has an unsupported
/// extension, or fails to parse.
pub fn load_config_file(path: &Path) -> AppResult<RunnerConfig> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}

/// Loads a single benchmark series description (JSON).
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
pub fn load_series(path: &Path) -> AppResult<BenchmarkDescription> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadSeries {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    serde_json::from_str(&content).map_err(|err| {
        AppError::config(ConfigError::ParseSeries {
            path: path.to_path_buf(),
            source: err,
        })
    })
}
