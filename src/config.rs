//! Per-call optimizer settings.
//!
//! Settings are plain values handed to each call. The crate never reads
//! environment variables or files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the exact optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Minimum gap between one train's exit and the next train's entry (minutes).
    pub headway_minutes: f64,
    /// Wall-clock budget for the MILP solve.
    #[serde(with = "duration_secs")]
    pub time_limit: Duration,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            headway_minutes: 2.0,
            time_limit: Duration::from_secs(10),
        }
    }
}

impl OptimizerConfig {
    /// Creates the default configuration (2 minute headway, 10 s budget).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the headway (minutes).
    pub fn with_headway(mut self, headway_minutes: f64) -> Self {
        self.headway_minutes = headway_minutes;
        self
    }

    /// Sets the solve budget.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Sets the solve budget in whole seconds.
    pub fn with_time_limit_secs(self, seconds: u64) -> Self {
        self.with_time_limit(Duration::from_secs(seconds))
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
