use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "ayush-lookup";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PORT: u16 = 5000;

const ENV_HOST: &str = "AYUSH_HOST";
const ENV_PORT: &str = "AYUSH_PORT";
const ENV_CATALOG: &str = "AYUSH_CATALOG";
const ENV_CORS_ORIGINS: &str = "AYUSH_CORS_ORIGINS";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "ayush_lookup=info,tower_http=info"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid AYUSH_PORT value: {0:?}")]
    InvalidPort(String),

    #[error("Invalid AYUSH_HOST value: {0:?}")]
    InvalidAddress(String),
}

/// Which origins the browser frontend may call from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

/// Runtime settings, read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// JSON catalog file; the built-in data set is served when `None`.
    pub catalog_path: Option<PathBuf>,
    pub cors_origins: CorsOrigins,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            catalog_path: None,
            cors_origins: CorsOrigins::Any,
        }
    }
}

impl ServerConfig {
    /// Read settings from process environment (after loading `.env`, if any).
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = var(ENV_HOST) {
            config.host = host
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidAddress(host.clone()))?;
        }

        if let Some(port) = var(ENV_PORT) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }

        config.catalog_path = var(ENV_CATALOG).map(PathBuf::from);

        if let Some(origins) = var(ENV_CORS_ORIGINS) {
            let list: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
            if !list.is_empty() && !list.iter().any(|o| o == "*") {
                config.cors_origins = CorsOrigins::List(list);
            }
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn reads_host_port_and_catalog() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("AYUSH_HOST", "127.0.0.1"),
            ("AYUSH_PORT", "8080"),
            ("AYUSH_CATALOG", "/etc/ayush/catalog.json"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/ayush/catalog.json"))
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("AYUSH_PORT", "  "), ("AYUSH_CATALOG", "")]))
                .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn rejects_bad_port() {
        let err = ServerConfig::from_lookup(lookup(&[("AYUSH_PORT", "70000")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("70000".into()));
    }

    #[test]
    fn rejects_bad_host() {
        let err = ServerConfig::from_lookup(lookup(&[("AYUSH_HOST", "localhost:1")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress(_)));
    }

    #[test]
    fn cors_origin_list_is_split_and_trimmed() {
        let config = ServerConfig::from_lookup(lookup(&[(
            "AYUSH_CORS_ORIGINS",
            "http://localhost:3000, https://ayush.example.org ,",
        )]))
        .unwrap();
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec![
                "http://localhost:3000".into(),
                "https://ayush.example.org".into()
            ])
        );
    }

    #[test]
    fn cors_wildcard_means_any() {
        let config =
            ServerConfig::from_lookup(lookup(&[("AYUSH_CORS_ORIGINS", "*")])).unwrap();
        assert_eq!(config.cors_origins, CorsOrigins::Any);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
