use std::time::{SystemTime, UNIX_EPOCH};

/// UTC timestamp represented as milliseconds since Unix epoch.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimestampUtc {
    unix_millis: i64,
}

impl TimestampUtc {
    /// The Unix epoch (`1970-01-01T00:00:00Z`).
    pub const UNIX_EPOCH: Self = Self { unix_millis: 0 };

    /// Returns the current UTC timestamp derived from system clock.
    #[must_use]
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    #[must_use]
    pub const fn from_unix_millis(unix_millis: i64) -> Self {
        Self { unix_millis }
    }

    #[must_use]
    pub fn from_system_time(value: SystemTime) -> Self {
        let unix_millis = match value.duration_since(UNIX_EPOCH) {
            Ok(delta) => i64::try_from(delta.as_millis()).unwrap_or(i64::MAX),
            Err(err) => i64::try_from(err.duration().as_millis())
                .map(|millis| -millis)
                .unwrap_or(i64::MIN),
        };
        Self { unix_millis }
    }

    #[must_use]
    pub const fn unix_millis(self) -> i64 {
        self.unix_millis
    }

    /// Milliseconds elapsed from `earlier` to `self`; negative when `earlier` is later.
    #[must_use]
    pub const fn millis_since(self, earlier: Self) -> i64 {
        self.unix_millis.saturating_sub(earlier.unix_millis)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Utc>> for TimestampUtc {
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        Self::from_unix_millis(value.timestamp_millis())
    }
}

#[cfg(feature = "chrono")]
impl TimestampUtc {
    /// Converts to chrono, or `None` when outside chrono's representable range.
    #[must_use]
    pub fn to_chrono(self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.unix_millis)
    }
}
