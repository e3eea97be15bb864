use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;

use crate::config::helpers::{optional_env, parse_env_or, parse_string_env, parse_value};
use crate::error::ConfigError;
use crate::settings::Settings;

/// Resolved HTTP gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Bearer token for protected routes. `None` means one is generated at
    /// startup.
    pub auth_token: Option<SecretString>,
}

impl GatewayConfig {
    pub(crate) fn resolve(settings: &Settings) -> Result<Self, ConfigError> {
        let host_raw = parse_string_env("GATEWAY_HOST", settings.gateway.host.clone())?;
        let host: IpAddr = parse_value("GATEWAY_HOST", &host_raw)?;
        let port = parse_env_or("GATEWAY_PORT", settings.gateway.port)?;
        let auth_token = optional_env("GATEWAY_AUTH_TOKEN")?
            .or_else(|| settings.gateway.auth_token.clone())
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .map(SecretString::from);

        Ok(Self {
            host,
            port,
            auth_token,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
