//! Server configuration
//!
//! Built-in defaults overridden by `FREIGHT_*` environment variables. A bare
//! `PORT` variable, when set, replaces the port of the bind address.

use anyhow::{Context, Result};
use ::config::{Config, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_env(None)?;
        if let Ok(port) = std::env::var("PORT") {
            config.apply_port(&port)?;
        }
        Ok(config)
    }

    /// Load with `vars` standing in for the process environment when given.
    pub fn from_env(vars: Option<HashMap<String, String>>) -> Result<Self> {
        Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("log_format", "pretty")?
            .add_source(Environment::with_prefix("FREIGHT").source(vars))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn apply_port(&mut self, port: &str) -> Result<()> {
        let port: u16 = port
            .trim()
            .parse()
            .with_context(|| format!("Invalid PORT value: {}", port))?;
        let mut addr = self.socket_addr()?;
        addr.set_port(port);
        self.bind_address = addr.to_string();
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Failed to parse bind address {}", self.bind_address))
    }
}
