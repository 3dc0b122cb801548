//! Configuration loading and discovery for `anime4k.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::Anime4kConfig;
use crate::executor::ExecutionStrategy;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up by [`find_config`].
pub const CONFIG_FILE_NAME: &str = "anime4k.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse anime4k.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override scale factor
    pub scale: Option<f32>,
    /// Override target width
    pub width: Option<u32>,
    /// Override target height
    pub height: Option<u32>,
    /// Override execution strategy
    pub strategy: Option<ExecutionStrategy>,
    /// Number of parallel jobs
    pub jobs: Option<usize>,
    /// Override pass count
    pub passes: Option<u32>,
    /// Enable the timing table
    pub timings: Option<bool>,
}

/// Find anime4k.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for anime4k.toml
/// 2. Check XDG_CONFIG_HOME/anime4k/anime4k.toml (or ~/.config/anime4k/anime4k.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find anime4k.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("anime4k").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find anime4k.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from an anime4k.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the
/// defaults.
///
/// # Example
/// ```ignore
/// let config = load_config(Some(Path::new("shots/anime4k.toml")))?;
/// let (w, h) = config.target_size(640, 360);
/// ```
pub fn load_config(path: Option<&Path>) -> Result<Anime4kConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(Anime4kConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<Anime4kConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: Anime4kConfig = toml::from_str(&contents)?;
    check(&config)?;
    Ok(config)
}

/// Turn [`Anime4kConfig::validate`] findings into a [`ConfigError`].
pub fn check(config: &Anime4kConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. A `--scale`
/// given without `--width`/`--height` also discards any absolute size
/// from the file, since an explicit size would otherwise win over it.
pub fn merge_cli_overrides(config: &mut Anime4kConfig, overrides: &CliOverrides) {
    let upscale = &mut config.upscale;

    if let Some(scale) = overrides.scale {
        upscale.scale = scale;
        if overrides.width.is_none() && overrides.height.is_none() {
            upscale.width = None;
            upscale.height = None;
        }
    }
    if let Some(width) = overrides.width {
        upscale.width = Some(width);
    }
    if let Some(height) = overrides.height {
        upscale.height = Some(height);
    }
    if let Some(strategy) = overrides.strategy {
        upscale.strategy = strategy;
    }
    if let Some(jobs) = overrides.jobs {
        upscale.jobs = Some(jobs);
    }
    if let Some(passes) = overrides.passes {
        upscale.passes = passes;
    }
    if let Some(timings) = overrides.timings {
        upscale.timings = timings;
    }
}
