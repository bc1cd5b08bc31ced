//! Controller configuration
//!
//! Values come from defaults, an optional serialized form (any serde format),
//! and `WIDGET_*` environment variables, in that order of precedence.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::wait::WaitOptions;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Where the widget server lives and how long calls poll it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub host: String,
    pub port: u16,
    /// Polling budget in seconds
    pub timeout: f64,
    /// Pause between attempts in seconds
    pub interval: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        let options = WaitOptions::default();
        Self {
            host: "localhost".to_string(),
            port: 9999,
            timeout: options.timeout.as_secs_f64(),
            interval: options.interval.as_secs_f64(),
        }
    }
}

impl ControllerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Defaults overlaid with `WIDGET_HOST`, `WIDGET_PORT`, `WIDGET_TIMEOUT`
    /// and `WIDGET_INTERVAL`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Overlay values found by `lookup` onto this configuration
    ///
    /// `lookup` maps a variable name to its value; [`from_env`](Self::from_env)
    /// passes the process environment.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("WIDGET_HOST") {
            self.host = host;
        }

        if let Some(port) = lookup("WIDGET_PORT") {
            self.port = port.trim().parse().map_err(|e| ConfigError::InvalidEnv {
                name: "WIDGET_PORT",
                reason: format!("{}", e),
            })?;
        }

        if let Some(timeout) = lookup("WIDGET_TIMEOUT") {
            self.timeout = parse_seconds("WIDGET_TIMEOUT", &timeout)?;
        }

        if let Some(interval) = lookup("WIDGET_INTERVAL") {
            self.interval = parse_seconds("WIDGET_INTERVAL", &interval)?;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }

        if self.port == 0 {
            return Err(ConfigError::Invalid("port must not be 0".to_string()));
        }

        seconds_to_duration("timeout", self.timeout)?;
        let interval = seconds_to_duration("interval", self.interval)?;
        if interval.is_zero() {
            return Err(ConfigError::Invalid("interval must be greater than zero".to_string()));
        }

        Ok(())
    }

    /// Timeout and interval as durations
    pub fn wait_options(&self) -> Result<WaitOptions, ConfigError> {
        Ok(WaitOptions::new(
            seconds_to_duration("timeout", self.timeout)?,
            seconds_to_duration("interval", self.interval)?,
        ))
    }
}

fn parse_seconds(name: &'static str, value: &str) -> Result<f64, ConfigError> {
    let seconds: f64 = value.trim().parse().map_err(|e| ConfigError::InvalidEnv {
        name,
        reason: format!("{}", e),
    })?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ConfigError::InvalidEnv {
            name,
            reason: format!("{} is not a non-negative number of seconds", value),
        });
    }

    Ok(seconds)
}

fn seconds_to_duration(field: &str, seconds: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| ConfigError::Invalid(format!("{} of {} seconds: {}", field, seconds, e)))
}
