//! Configuration schema types for `anime4k.toml`
//!
//! ```toml
//! [upscale]
//! scale = 2.0
//! width = 1920
//! strategy = "parallel"
//! jobs = 8
//! passes = 1
//! timings = false
//! ```

use crate::executor::ExecutionStrategy;
use serde::{Deserialize, Serialize};

/// Upscaling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpscaleConfig {
    /// Scale factor, used for any axis without an explicit size
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Absolute target width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Absolute target height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// How stage rows are scheduled
    #[serde(default)]
    pub strategy: ExecutionStrategy,
    /// Worker threads for the parallel strategy (rayon's default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
    /// Number of times the pipeline is run, for benchmarking
    #[serde(default = "default_passes")]
    pub passes: u32,
    /// Print the per-stage timing table after the last pass
    #[serde(default)]
    pub timings: bool,
}

impl Default for UpscaleConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            width: None,
            height: None,
            strategy: ExecutionStrategy::default(),
            jobs: None,
            passes: default_passes(),
            timings: false,
        }
    }
}

fn default_scale() -> f32 {
    2.0
}

fn default_passes() -> u32 {
    1
}

/// Root configuration structure for `anime4k.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anime4kConfig {
    /// Upscaling settings
    #[serde(default)]
    pub upscale: UpscaleConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "upscale.scale")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "anime4k.toml: '{}' {}", self.field, self.message)
    }
}

impl Anime4kConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let upscale = &self.upscale;

        if !upscale.scale.is_finite() || upscale.scale <= 0.0 {
            errors.push(ConfigValidationError {
                field: "upscale.scale".to_string(),
                message: "must be a positive number".to_string(),
            });
        }

        for (field, value) in [("upscale.width", upscale.width), ("upscale.height", upscale.height)] {
            if value == Some(0) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
        }

        if upscale.jobs == Some(0) {
            errors.push(ConfigValidationError {
                field: "upscale.jobs".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if upscale.passes == 0 {
            errors.push(ConfigValidationError {
                field: "upscale.passes".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }

    /// Resolve the target size for a `source_width x source_height` image.
    ///
    /// An explicit width or height wins. When only one is given the other
    /// keeps the source aspect ratio; otherwise both axes use `scale`.
    /// Results are rounded and never below 1.
    pub fn target_size(&self, source_width: u32, source_height: u32) -> (u32, u32) {
        let scaled = |dim: u32, factor: f64| ((dim as f64 * factor).round() as u32).max(1);
        let upscale = &self.upscale;

        match (upscale.width, upscale.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, scaled(source_height, w as f64 / source_width.max(1) as f64)),
            (None, Some(h)) => (scaled(source_width, h as f64 / source_height.max(1) as f64), h),
            (None, None) => {
                let factor = upscale.scale as f64;
                (scaled(source_width, factor), scaled(source_height, factor))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: Anime4kConfig = toml::from_str("").unwrap();
        assert_eq!(config, Anime4kConfig::default());
        assert_eq!(config.upscale.scale, 2.0);
        assert_eq!(config.upscale.passes, 1);
        assert_eq!(config.upscale.strategy, ExecutionStrategy::Parallel);
        assert!(!config.upscale.timings);
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[upscale]
scale = 3.5
width = 1920
height = 1080
strategy = "sequential"
jobs = 4
passes = 10
timings = true
"#;
        let config: Anime4kConfig = toml::from_str(toml).unwrap();
        let upscale = &config.upscale;
        assert_eq!(upscale.scale, 3.5);
        assert_eq!(upscale.width, Some(1920));
        assert_eq!(upscale.height, Some(1080));
        assert_eq!(upscale.strategy, ExecutionStrategy::Sequential);
        assert_eq!(upscale.jobs, Some(4));
        assert_eq!(upscale.passes, 10);
        assert!(upscale.timings);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let result: Result<Anime4kConfig, _> = toml::from_str("[upscale]\nstrategy = \"gpu\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_reports_every_field() {
        let config = Anime4kConfig {
            upscale: UpscaleConfig {
                scale: -1.0,
                width: Some(0),
                height: Some(0),
                jobs: Some(0),
                passes: 0,
                ..Default::default()
            },
        };
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["upscale.scale", "upscale.width", "upscale.height", "upscale.jobs", "upscale.passes"]
        );
    }

    #[test]
    fn test_validate_rejects_nan_scale() {
        let mut config = Anime4kConfig::default();
        config.upscale.scale = f32::NAN;
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigValidationError {
            field: "upscale.passes".to_string(),
            message: "must be a positive integer".to_string(),
        };
        assert_eq!(err.to_string(), "anime4k.toml: 'upscale.passes' must be a positive integer");
    }

    #[test]
    fn test_target_size_from_scale() {
        let config = Anime4kConfig::default();
        assert_eq!(config.target_size(640, 360), (1280, 720));

        let mut config = Anime4kConfig::default();
        config.upscale.scale = 1.5;
        assert_eq!(config.target_size(3, 3), (5, 5));

        config.upscale.scale = 0.01;
        assert_eq!(config.target_size(10, 10), (1, 1));
    }

    #[test]
    fn test_target_size_explicit_axes() {
        let mut config = Anime4kConfig::default();
        config.upscale.width = Some(1920);
        assert_eq!(config.target_size(640, 360), (1920, 1080));

        config.upscale.width = None;
        config.upscale.height = Some(720);
        assert_eq!(config.target_size(640, 360), (1280, 720));

        config.upscale.width = Some(100);
        assert_eq!(config.target_size(640, 360), (100, 720));
    }
}
