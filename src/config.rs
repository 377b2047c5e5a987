//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

/// Log filter used when verbose logging is on.
pub const VERBOSE_LOG_FILTER: &str = "family_api=debug,info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address to bind the HTTP server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Attach a permissive CORS layer.
    #[serde(default = "default_true")]
    pub cors_permissive: bool,

    /// Install the Prometheus exporter and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    // === Family ===
    /// Family last name.
    #[serde(default = "default_family_name")]
    pub family_name: String,

    /// Start with the default members instead of an empty family.
    #[serde(default = "default_true")]
    pub seed_members: bool,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_family_name() -> String {
    "Jackson".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_permissive: true,
            metrics_enabled: true,
            family_name: default_family_name(),
            seed_members: true,
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.family_name.trim().is_empty() {
            return Err("FAMILY_NAME must not be empty".to_string());
        }

        if self.host.parse::<IpAddr>().is_err() {
            return Err(format!("HOST must be an IP address, got {:?}", self.host));
        }

        Ok(())
    }

    /// Log filter directives. `verbose_flag` is the CLI `--verbose`, which
    /// wins over `RUST_LOG` the same way `VERBOSE` does.
    pub fn log_filter(&self, verbose_flag: bool) -> String {
        if verbose_flag || self.verbose {
            VERBOSE_LOG_FILTER.to_string()
        } else {
            self.rust_log.clone()
        }
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| format!("HOST must be an IP address, got {:?}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.family_name, "Jackson");
        assert!(config.seed_members);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn envy_fills_defaults_for_missing_vars() {
        let config: Config = envy::from_iter(vec![("PORT".to_string(), "8081".to_string())]).unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.metrics_enabled);
    }

    #[test]
    fn envy_reads_booleans() {
        let config: Config = envy::from_iter(vec![
            ("SEED_MEMBERS".to_string(), "false".to_string()),
            ("FAMILY_NAME".to_string(), "Smith".to_string()),
        ])
        .unwrap();
        assert!(!config.seed_members);
        assert_eq!(config.family_name, "Smith");
    }

    #[test]
    fn validate_rejects_blank_family_name() {
        let config = Config {
            family_name: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_host() {
        let config = Config {
            host: "not-an-ip".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(config.bind_addr().is_err());
    }

    #[test]
    fn log_filter_follows_rust_log() {
        let config: Config = envy::from_iter(vec![(
            "RUST_LOG".to_string(),
            "family_api=trace,warn".to_string(),
        )])
        .unwrap();
        assert_eq!(config.log_filter(false), "family_api=trace,warn");
        assert_eq!(Config::default().log_filter(false), "info");
    }

    #[test]
    fn log_filter_is_verbose_from_env_or_flag() {
        let config: Config =
            envy::from_iter(vec![("VERBOSE".to_string(), "true".to_string())]).unwrap();
        assert_eq!(config.log_filter(false), VERBOSE_LOG_FILTER);
        assert_eq!(Config::default().log_filter(true), VERBOSE_LOG_FILTER);
    }

    #[test]
    fn bind_addr_combines_host_and_port() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 4000,
            ..Config::default()
        };
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:4000");
    }
}
