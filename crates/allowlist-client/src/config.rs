//! Client configuration.

use serde::Deserialize;
use std::time::Duration;

/// Where and how to reach the registration API.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5001".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}
