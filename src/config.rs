use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 3000;

/// Settings for the standalone server. Read from `HOST` and `PORT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self { Self { host: IpAddr::V4(Ipv4Addr::LOCALHOST), port: DEFAULT_PORT } }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> { Self::from_lookup(|key| std::env::var(key).ok()) }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(host) = non_empty(lookup("HOST")) {
            config.host = host.parse().with_context(|| format!("invalid HOST {host:?}"))?;
        }
        if let Some(port) = non_empty(lookup("PORT")) {
            config.port = port.parse().with_context(|| format!("invalid PORT {port:?}"))?;
        }
        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
