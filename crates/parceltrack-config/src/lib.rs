mod schema;

use std::fs;
use std::path::Path;
use std::time::Duration;

use parceltrack_progress::{
    AnimationStart, EstimatorConfig, ProgressAnimator, DEFAULT_ANIMATION_DURATION_MS,
};
use thiserror::Error;

pub use schema::json_schema;
use schema::ParceltrackConfigDocument;

/// Top-level typed configuration contract.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParceltrackConfig {
    pub estimator: EstimatorConfig,
    pub animation: AnimationConfig,
    pub logging: LoggingConfig,
}

impl ParceltrackConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded parceltrack config");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let document: ParceltrackConfigDocument =
            serde_yaml::from_str(text).map_err(ConfigError::Parse)?;
        let config = Self::from(document);
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(&ParceltrackConfigDocument::from(self))
            .map_err(ConfigError::SerializeConfig)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let speed = self.estimator.average_speed_mph;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::InvalidAverageSpeed { value: speed });
        }
        if self.animation.duration.is_zero() {
            return Err(ConfigError::ZeroAnimationDuration);
        }
        Ok(())
    }

    #[must_use]
    pub fn estimator_config(&self) -> EstimatorConfig {
        self.estimator
    }

    #[must_use]
    pub fn animator(&self) -> ProgressAnimator {
        ProgressAnimator::new(self.animation.start, self.animation.duration_ms())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    pub duration: Duration,
    pub start: AnimationStart,
}

impl AnimationConfig {
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1_000.0
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS as u64),
            start: AnimationStart::Reset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    Pretty,
    #[default]
    Compact,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(serde_yaml::Error),

    #[error("failed to serialize config: {0}")]
    SerializeConfig(serde_yaml::Error),

    #[error("estimator.average_speed_mph must be finite and > 0, got {value}")]
    InvalidAverageSpeed { value: f64 },

    #[error("animation.duration must be greater than zero")]
    ZeroAnimationDuration,
}
