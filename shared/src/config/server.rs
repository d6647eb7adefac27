//! Server configuration module

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Apply `SERVER_HOST` / `SERVER_PORT` overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            self.port = port.parse().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT".to_string(),
                reason: format!("not a valid port number: {}", port),
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Missing {
                name: "server.host".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.workers, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_address_uses_host_and_port() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_blank_host_is_rejected() {
        let config = ServerConfig {
            host: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
