//! Configuration resolved from the settings file and environment.
//!
//! Precedence: CLI flags (applied by the binary) > environment > settings
//! file > defaults.

mod context;
mod gateway;
pub(crate) mod helpers;

pub use context::ContextConfig;
pub use gateway::GatewayConfig;

use crate::error::ConfigError;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Config {
    pub context: ContextConfig,
    pub gateway: GatewayConfig,
}

impl Config {
    pub fn resolve(settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self {
            context: ContextConfig::resolve(settings)?,
            gateway: GatewayConfig::resolve(settings)?,
        })
    }
}
