use std::time::Duration;

use parceltrack_progress::{
    AnimationStart, EstimatorConfig, RatioMethod, DEFAULT_ANIMATION_DURATION_MS,
    DEFAULT_AVERAGE_SPEED_MPH,
};
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::{AnimationConfig, LogFormat, LogLevel, LoggingConfig, ParceltrackConfig};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct ParceltrackConfigDocument {
    #[serde(default)]
    pub estimator: EstimatorDocument,
    #[serde(default)]
    pub animation: AnimationDocument,
    #[serde(default)]
    pub logging: LoggingDocument,
}

impl From<&ParceltrackConfig> for ParceltrackConfigDocument {
    fn from(value: &ParceltrackConfig) -> Self {
        Self {
            estimator: EstimatorDocument::from(&value.estimator),
            animation: AnimationDocument::from(&value.animation),
            logging: LoggingDocument::from(&value.logging),
        }
    }
}

impl From<ParceltrackConfigDocument> for ParceltrackConfig {
    fn from(value: ParceltrackConfigDocument) -> Self {
        Self {
            estimator: value.estimator.into(),
            animation: value.animation.into(),
            logging: value.logging.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct EstimatorDocument {
    #[serde(default = "default_average_speed_mph")]
    pub average_speed_mph: f64,
    #[serde(default)]
    pub ratio_method: RatioMethodDocument,
}

impl Default for EstimatorDocument {
    fn default() -> Self {
        Self::from(&EstimatorConfig::default())
    }
}

impl From<&EstimatorConfig> for EstimatorDocument {
    fn from(value: &EstimatorConfig) -> Self {
        Self {
            average_speed_mph: value.average_speed_mph,
            ratio_method: RatioMethodDocument::from(value.ratio_method),
        }
    }
}

impl From<EstimatorDocument> for EstimatorConfig {
    fn from(value: EstimatorDocument) -> Self {
        Self {
            average_speed_mph: value.average_speed_mph,
            ratio_method: value.ratio_method.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RatioMethodDocument {
    #[default]
    Haversine,
    Planar,
}

impl From<RatioMethod> for RatioMethodDocument {
    fn from(value: RatioMethod) -> Self {
        match value {
            RatioMethod::Haversine => Self::Haversine,
            RatioMethod::Planar => Self::Planar,
        }
    }
}

impl From<RatioMethodDocument> for RatioMethod {
    fn from(value: RatioMethodDocument) -> Self {
        match value {
            RatioMethodDocument::Haversine => Self::Haversine,
            RatioMethodDocument::Planar => Self::Planar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct AnimationDocument {
    #[serde(default = "default_animation_duration_document")]
    pub duration: DurationDocument,
    #[serde(default)]
    pub start: AnimationStartDocument,
}

impl Default for AnimationDocument {
    fn default() -> Self {
        Self::from(&AnimationConfig::default())
    }
}

impl From<&AnimationConfig> for AnimationDocument {
    fn from(value: &AnimationConfig) -> Self {
        Self {
            duration: DurationDocument::from_duration(value.duration),
            start: AnimationStartDocument::from(value.start),
        }
    }
}

impl From<AnimationDocument> for AnimationConfig {
    fn from(value: AnimationDocument) -> Self {
        Self {
            duration: value.duration.into_duration(),
            start: value.start.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AnimationStartDocument {
    #[default]
    Reset,
    CarryForward,
}

impl From<AnimationStart> for AnimationStartDocument {
    fn from(value: AnimationStart) -> Self {
        match value {
            AnimationStart::Reset => Self::Reset,
            AnimationStart::CarryForward => Self::CarryForward,
        }
    }
}

impl From<AnimationStartDocument> for AnimationStart {
    fn from(value: AnimationStartDocument) -> Self {
        match value {
            AnimationStartDocument::Reset => Self::Reset,
            AnimationStartDocument::CarryForward => Self::CarryForward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[schemars(with = "String")]
pub(crate) struct DurationDocument(Duration);

impl DurationDocument {
    pub(crate) const fn from_duration(value: Duration) -> Self {
        Self(value)
    }

    pub(crate) const fn into_duration(self) -> Duration {
        self.0
    }
}

impl Serialize for DurationDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_duration(self.0))
    }
}

impl<'de> Deserialize<'de> for DurationDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawDuration {
            Text(String),
            Milliseconds(u64),
        }

        let raw = RawDuration::deserialize(deserializer)?;
        match raw {
            RawDuration::Text(text) => parse_duration(&text)
                .map(Self)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid duration: {text}"))),
            RawDuration::Milliseconds(ms) => Ok(Self(Duration::from_millis(ms))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct LoggingDocument {
    #[serde(default)]
    pub level: LogLevelDocument,
    #[serde(default)]
    pub format: LogFormatDocument,
}

impl From<&LoggingConfig> for LoggingDocument {
    fn from(value: &LoggingConfig) -> Self {
        Self {
            level: LogLevelDocument::from(value.level),
            format: LogFormatDocument::from(value.format),
        }
    }
}

impl From<LoggingDocument> for LoggingConfig {
    fn from(value: LoggingDocument) -> Self {
        Self {
            level: value.level.into(),
            format: value.format.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum LogLevelDocument {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LogLevelDocument {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::Trace,
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
        }
    }
}

impl From<LogLevelDocument> for LogLevel {
    fn from(value: LogLevelDocument) -> Self {
        match value {
            LogLevelDocument::Trace => Self::Trace,
            LogLevelDocument::Debug => Self::Debug,
            LogLevelDocument::Info => Self::Info,
            LogLevelDocument::Warn => Self::Warn,
            LogLevelDocument::Error => Self::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum LogFormatDocument {
    Json,
    Pretty,
    #[default]
    Compact,
}

impl From<LogFormat> for LogFormatDocument {
    fn from(value: LogFormat) -> Self {
        match value {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

impl From<LogFormatDocument> for LogFormat {
    fn from(value: LogFormatDocument) -> Self {
        match value {
            LogFormatDocument::Json => Self::Json,
            LogFormatDocument::Pretty => Self::Pretty,
            LogFormatDocument::Compact => Self::Compact,
        }
    }
}

pub fn json_schema() -> JsonValue {
    serde_json::to_value(schema_for!(ParceltrackConfigDocument)).unwrap_or(JsonValue::Null)
}

fn default_average_speed_mph() -> f64 {
    DEFAULT_AVERAGE_SPEED_MPH
}

fn default_animation_duration_document() -> DurationDocument {
    DurationDocument::from_duration(Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS as u64))
}

fn parse_duration(raw: &str) -> Option<Duration> {
    let text = raw.trim();
    if let Some(value) = text.strip_suffix("ms") {
        return value.trim().parse::<u64>().ok().map(Duration::from_millis);
    }
    if let Some(value) = text.strip_suffix('s') {
        return value.trim().parse::<u64>().ok().map(Duration::from_secs);
    }

    text.parse::<u64>().ok().map(Duration::from_millis)
}

fn format_duration(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        return format!("{}s", duration.as_secs());
    }

    format!("{}ms", duration.as_millis())
}
