use std::time::Duration;

use crate::config::helpers::{parse_env_or, parse_optional_env};
use crate::context::sweeper::MAX_SWEEP_INTERVAL;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Resolved context store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// Summary bound in characters.
    pub max_chars: usize,
    /// Idle TTL; `None` disables the sweeper.
    pub session_ttl: Option<Duration>,
    pub sweep_interval: Duration,
}

fn validate_max_chars(value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            key: "CONTEXT_MAX_CHARS".to_string(),
            message: "summary bound must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

fn validate_sweep_interval(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: "CONTEXT_SWEEP_INTERVAL_SECS".to_string(),
            message: "sweep interval must be at least one second".to_string(),
        });
    }
    let interval = Duration::from_secs(secs);
    if interval > MAX_SWEEP_INTERVAL {
        return Err(ConfigError::InvalidValue {
            key: "CONTEXT_SWEEP_INTERVAL_SECS".to_string(),
            message: format!(
                "sweep interval must be at most {} seconds",
                MAX_SWEEP_INTERVAL.as_secs()
            ),
        });
    }
    Ok(interval)
}

impl ContextConfig {
    pub(crate) fn resolve(settings: &Settings) -> Result<Self, ConfigError> {
        let max_chars = validate_max_chars(parse_env_or(
            "CONTEXT_MAX_CHARS",
            settings.context.max_chars,
        )?)?;
        let session_ttl = parse_optional_env(
            "CONTEXT_SESSION_TTL_SECS",
            settings.context.session_ttl_secs,
        )?
        .map(Duration::from_secs);
        let sweep_interval = validate_sweep_interval(parse_env_or(
            "CONTEXT_SWEEP_INTERVAL_SECS",
            settings.context.sweep_interval_secs,
        )?)?;

        Ok(Self {
            max_chars,
            session_ttl,
            sweep_interval,
        })
    }
}
