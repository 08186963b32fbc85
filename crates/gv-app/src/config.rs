//! Collaborator endpoint configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Environment variable overriding `api_base`.
pub const API_ENV_VAR: &str = "GENVANET_API";

/// Longest accepted per-request timeout, one day.
pub const MAX_TIMEOUT_S: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base: String,
    pub options_path: String,
    pub simulate_path: String,
    pub predict_path: String,
    /// Per-request timeout; simulations routinely take tens of seconds.
    pub timeout_s: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000".to_string(),
            options_path: "/simulate/options".to_string(),
            simulate_path: "/simulate".to_string(),
            predict_path: "/predict".to_string(),
            timeout_s: 120.0,
        }
    }
}

impl DashboardConfig {
    /// Defaults, or the YAML file at `path`, then environment overrides.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config = match path {
            Some(path) => Self::load_yaml(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn load_yaml(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::ConfigFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(api_base) = lookup(API_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.api_base = api_base.trim().to_string();
        }
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        let in_range = self.timeout_s > 0.0 && self.timeout_s <= MAX_TIMEOUT_S;
        if !in_range {
            return Err(AppError::Config(format!(
                "timeout_s must be in (0, {MAX_TIMEOUT_S}], got {}",
                self.timeout_s
            )));
        }
        Ok(())
    }

    /// Per-request timeout, capped at `MAX_TIMEOUT_S`. Non-positive and
    /// non-finite values fall back to the default.
    pub fn timeout(&self) -> Duration {
        if self.timeout_s.is_finite() && self.timeout_s > 0.0 {
            Duration::from_secs_f64(self.timeout_s.min(MAX_TIMEOUT_S))
        } else {
            Duration::from_secs_f64(Self::default().timeout_s)
        }
    }

    /// Join `api_base` and an endpoint path without doubling slashes.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn options_url(&self) -> String {
        self.url(&self.options_path)
    }

    pub fn simulate_url(&self) -> String {
        self.url(&self.simulate_path)
    }

    pub fn predict_url(&self) -> String {
        self.url(&self.predict_path)
    }
}
