//! Configuration for panel settings module

use serde::Deserialize;
use std::time::Duration;

/// Panel settings configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum number of change notifications waiting for delivery; further
    /// events are dropped
    #[serde(default = "default_notify_queue_capacity")]
    pub notify_queue_capacity: usize,

    /// Upper bound for delivering one notification
    #[serde(default = "default_notify_timeout", with = "humantime_serde")]
    pub notify_timeout: Duration,

    /// How long `stop` waits for the notification worker
    #[serde(default = "default_stop_timeout", with = "humantime_serde")]
    pub stop_timeout: Duration,
}

impl Config {
    /// Parse a YAML document
    pub fn from_yaml(input: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notify_queue_capacity: default_notify_queue_capacity(),
            notify_timeout: default_notify_timeout(),
            stop_timeout: default_stop_timeout(),
        }
    }
}

fn default_notify_queue_capacity() -> usize {
    64
}

fn default_notify_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_stop_timeout() -> Duration {
    Duration::from_secs(30)
}
