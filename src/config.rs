use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub jwt_secret: Vec<u8>,
    pub cors_allow_origin: Option<String>,
}

impl AppConfig {
    /// Reads configuration from the process environment. Passing `--release`
    /// on the command line switches to `DATABASE_RELEASE_URL`.
    pub fn from_env() -> anyhow::Result<Self> {
        let release = std::env::args().skip(1).any(|arg| arg == "--release");
        Self::from_lookup(release, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(release: bool, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url_key = if release { "DATABASE_RELEASE_URL" } else { "DATABASE_URL" };
        let database_url = lookup(url_key)
            .filter(|v| !v.trim().is_empty())
            .with_context(|| format!("{} is not set", url_key))?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {}", raw))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("Invalid BIND_ADDR: {}", bind_addr))?;

        let jwt_secret = lookup("JWT_SECRET")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .context("JWT_SECRET is not set")?;
        if jwt_secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 bytes");
        }

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(10),
            bind_addr,
            jwt_secret: jwt_secret.into_bytes(),
            cors_allow_origin: lookup("CORS_ALLOW_ORIGIN").filter(|v| !v.is_empty()),
        })
    }
}
