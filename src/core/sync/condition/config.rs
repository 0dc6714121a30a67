/*!
 * Condition Configuration
 *
 * Default deadlines for timed and polling waits
 */

use crate::core::errors::{ConditionError, ConditionResult};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::time::Duration;

/// Environment variable overriding the default wait deadline (ms)
pub const TIMEOUT_ENV: &str = "CONDITION_TIMEOUT_MS";

/// Environment variable overriding the default poll interval (ms)
pub const POLL_DELAY_ENV: &str = "CONDITION_POLL_DELAY_MS";

/// Defaults applied when a caller does not pass explicit durations
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionConfig {
    /// Deadline for `timed_wait` / `polling_wait`
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "timeout_ms")]
    pub default_timeout: Duration,
    /// Delay between predicate checks in `polling_wait`
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "poll_delay_ms")]
    pub poll_delay: Duration,
}

impl Default for ConditionConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_millis(10_000),
            poll_delay: Duration::from_millis(100),
        }
    }
}

impl ConditionConfig {
    /// Configuration for short UI-style waits (1s deadline, 10ms polling)
    pub const fn short_wait() -> Self {
        Self {
            default_timeout: Duration::from_secs(1),
            poll_delay: Duration::from_millis(10),
        }
    }

    /// Configuration for long background waits (60s deadline, 500ms polling)
    pub const fn long_wait() -> Self {
        Self {
            default_timeout: Duration::from_secs(60),
            poll_delay: Duration::from_millis(500),
        }
    }

    /// Set the default deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set the default poll interval
    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }

    /// Load defaults, overridden by `CONDITION_TIMEOUT_MS` / `CONDITION_POLL_DELAY_MS`
    pub fn from_env() -> ConditionResult<Self> {
        let mut config = Self::default();
        if let Some(timeout) = read_millis(TIMEOUT_ENV)? {
            config.default_timeout = timeout;
        }
        if let Some(delay) = read_millis(POLL_DELAY_ENV)? {
            config.poll_delay = delay;
        }
        Ok(config)
    }

    /// Parse a JSON document such as `{"timeout_ms": 500, "poll_delay_ms": 20}`
    pub fn from_json(raw: &str) -> ConditionResult<Self> {
        serde_json::from_str(raw).map_err(|e| ConditionError::InvalidConfig(e.to_string()))
    }
}

fn read_millis(key: &str) -> ConditionResult<Option<Duration>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|e| ConditionError::InvalidConfig(format!("{key}={raw:?}: {e}"))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConditionError::InvalidConfig(format!("{key}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConditionConfig::default();
        assert_eq!(config.default_timeout, Duration::from_millis(10_000));
        assert_eq!(config.poll_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_presets_and_builders() {
        assert!(ConditionConfig::short_wait().default_timeout < ConditionConfig::long_wait().default_timeout);

        let config = ConditionConfig::default()
            .with_timeout(Duration::from_millis(250))
            .with_poll_delay(Duration::from_millis(5));
        assert_eq!(config.default_timeout, Duration::from_millis(250));
        assert_eq!(config.poll_delay, Duration::from_millis(5));
    }

    #[test]
    fn test_from_json_partial() {
        let config = ConditionConfig::from_json(r#"{"timeout_ms": 500}"#).unwrap();
        assert_eq!(config.default_timeout, Duration::from_millis(500));
        assert_eq!(config.poll_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_from_json_invalid() {
        let err = ConditionConfig::from_json(r#"{"timeout_ms": "soon"}"#).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidConfig(_)));
    }
}
