use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_DB_PATH: &str = "data/database.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Everything the process needs at startup. Built once and passed down;
/// nothing else is global.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read `ATRIUM_DB_PATH`, `ATRIUM_HOST` and `ATRIUM_PORT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("ATRIUM_DB_PATH")
            .unwrap_or_else(|| DEFAULT_DB_PATH.into())
            .into();
        let host = lookup("ATRIUM_HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = match lookup("ATRIUM_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("ATRIUM_PORT is not a valid port: {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            db_path,
            host,
            port,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("data/database.db"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.listen_addr().unwrap().port(), 5000);
    }

    #[test]
    fn overrides_from_environment() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("ATRIUM_DB_PATH", "/tmp/atrium.db"),
            ("ATRIUM_HOST", "127.0.0.1"),
            ("ATRIUM_PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/atrium.db"));
        assert_eq!(
            config.listen_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = ServerConfig::from_lookup(lookup_from(&[("ATRIUM_PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("ATRIUM_PORT"));
    }

    #[test]
    fn bad_host_fails_at_listen_addr() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("ATRIUM_HOST", "not a host")])).unwrap();
        assert!(config.listen_addr().is_err());
    }
}
