//! Host configuration

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "FRASS_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "frass.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// Base URL of the recognition backend; `/api/*` is forwarded here.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
}

fn default_port() -> u16 {
    8080
}

fn default_bind_address() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            backend_url: default_backend_url(),
        }
    }
}

impl HostConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Backend base URL without a trailing slash.
    pub fn backend_base(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }
}

fn config_file() -> (PathBuf, bool) {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) => (PathBuf::from(path), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    }
}

pub fn load_config() -> Result<HostConfig> {
    let (path, required) = config_file();

    let config = ::config::Config::builder()
        .set_default("port", default_port())?
        .set_default("bind_address", default_bind_address().to_string())?
        .set_default("backend_url", default_backend_url())?
        // An explicit FRASS_CONFIG must exist; the default file is optional
        .add_source(
            ::config::File::from(path.clone())
                .format(::config::FileFormat::Toml)
                .required(required),
        )
        // Override with environment variables (FRASS__PORT, FRASS__BACKEND_URL, ...)
        .add_source(
            ::config::Environment::with_prefix("FRASS")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: HostConfig = config
        .try_deserialize()
        .context("Invalid host configuration")?;

    url::Url::parse(&config.backend_url)
        .with_context(|| format!("backend_url is not a URL: {}", config.backend_url))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for key in [
            CONFIG_PATH_ENV,
            "FRASS__PORT",
            "FRASS__BACKEND_URL",
            "FRASS__BIND_ADDRESS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_file_or_env() {
        clear_env();
        let config = load_config().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address.to_string(), "0.0.0.0");
        assert_eq!(config.backend_url, "http://127.0.0.1:5000");
    }

    #[test]
    #[serial]
    fn test_file_overrides_defaults() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9090\nbackend_url = \"http://flask:5000/\"").unwrap();
        std::env::set_var(CONFIG_PATH_ENV, file.path());

        let config = load_config().unwrap();
        clear_env();

        assert_eq!(config.port, 9090);
        assert_eq!(config.backend_base(), "http://flask:5000");
        assert_eq!(config.bind_address.to_string(), "0.0.0.0");
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9090").unwrap();
        std::env::set_var(CONFIG_PATH_ENV, file.path());
        std::env::set_var("FRASS__PORT", "7000");
        std::env::set_var("FRASS__BIND_ADDRESS", "127.0.0.1");

        let config = load_config().unwrap();
        clear_env();

        assert_eq!(config.port, 7000);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:7000");
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_an_error() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(CONFIG_PATH_ENV, dir.path().join("absent.toml"));

        let result = load_config();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_rejects_malformed_backend_url() {
        clear_env();
        std::env::set_var("FRASS__BACKEND_URL", "not a url");

        let result = load_config();
        clear_env();

        assert!(result.is_err());
    }
}
