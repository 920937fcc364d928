// Copyright (c) 2025 - Cowboy AI, Inc.
//! Portal configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{PortalError, PortalResult};

pub const ENV_API_URL: &str = "ACMQ_API_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "ACMQ_API_TIMEOUT_SECS";
pub const ENV_SUCCESS_DELAY_MS: &str = "ACMQ_SUCCESS_DELAY_MS";

/// Connection and timing settings for the provisioning backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Backend base URL; `/api/...` paths are appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Pause between a successful order and the success callback
    #[serde(default = "default_success_delay")]
    pub success_delay_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_success_delay() -> u64 {
    2000
}

fn default_user_agent() -> String {
    concat!("acmq-portal/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            success_delay_ms: default_success_delay(),
            user_agent: default_user_agent(),
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> PortalResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PortalResult<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup(ENV_API_TIMEOUT_SECS) {
            config.timeout_secs = parse_number(ENV_API_TIMEOUT_SECS, &secs)?;
        }
        if let Some(ms) = lookup(ENV_SUCCESS_DELAY_MS) {
            config.success_delay_ms = parse_number(ENV_SUCCESS_DELAY_MS, &ms)?;
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }
}

fn parse_number(key: &str, value: &str) -> PortalResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| PortalError::Configuration(format!("{key}={value:?}: {e}")))
}
