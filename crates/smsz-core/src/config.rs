use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, SmszError};

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub gateway: GatewayConfig,
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub tick_ms: u64,
    pub step: f64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.into(),
            request_timeout_ms: 10_000,
        }
    }
}

impl GatewayConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Full URL for an endpoint path such as `/compress`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base(), path.trim_start_matches('/'))
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { tick_ms: 10, step: 1.0 }
    }
}

impl AnimationConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl ClientConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: ClientConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.gateway.base();
        if base.is_empty() {
            return Err(SmszError::InvalidConfig("gateway.base_url is empty".into()));
        }
        if !base.starts_with("http://") {
            return Err(SmszError::InvalidConfig(format!(
                "gateway.base_url must start with http://: {}",
                base
            )));
        }
        if self.gateway.request_timeout_ms == 0 {
            return Err(SmszError::InvalidConfig("gateway.request_timeout_ms must be > 0".into()));
        }
        if self.animation.tick_ms == 0 {
            return Err(SmszError::InvalidConfig("animation.tick_ms must be > 0".into()));
        }
        if !(self.animation.step.is_finite() && self.animation.step > 0.0) {
            return Err(SmszError::InvalidConfig("animation.step must be a positive number".into()));
        }
        Ok(())
    }
}
