//! Server configuration.

use cicero_error::ConfigError;
use derive_getters::Getters;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Bind address and CORS allowlist for the HTTP server.
#[derive(Debug, Clone, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct AppConfig {
    /// Address the listener binds to
    #[builder(default = "IpAddr::V4(Ipv4Addr::UNSPECIFIED)")]
    host: IpAddr,
    /// Port the listener binds to
    #[builder(default = "DEFAULT_PORT")]
    port: u16,
    /// Origins allowed by CORS
    #[builder(default = "vec![String::from(DEFAULT_ORIGIN)]")]
    allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `HOST` (default: 0.0.0.0)
    /// - `PORT` (default: 8000)
    /// - `ALLOWED_ORIGINS` (comma-separated, default: http://localhost:3000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfigBuilder::default();

        if let Ok(host) = std::env::var("HOST") {
            let host: IpAddr = host
                .parse()
                .map_err(|_| ConfigError::new(format!("Invalid HOST: {}", host)))?;
            builder.host(host);
        }
        if let Ok(port) = std::env::var("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| ConfigError::new(format!("Invalid PORT: {}", port)))?;
            builder.port(port);
        }
        if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !origins.is_empty() {
                builder.allowed_origins(origins);
            }
        }

        Ok(builder.build().expect("Valid AppConfig"))
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfigBuilder::default().build().expect("Valid AppConfig")
    }
}
