//! HTTP Server Configuration
//!
//! Configuration for the HTTP server including host, port, and CORS settings.

use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 6969)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    6969
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Take host and port from a parsed `host:port` address
    pub fn set_listen_addr(&mut self, addr: SocketAddr) {
        self.host = addr.ip().to_string();
        self.port = addr.port();
    }

    /// Get the socket address string; IPv6 hosts come out bracketed
    pub fn socket_addr(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.port).to_string(),
            Err(_) => format!("{}:{}", self.host, self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 6969);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_set_listen_addr() {
        let mut config = HttpServerConfig::default();
        config.set_listen_addr("127.0.0.1:4000".parse().unwrap());
        assert_eq!(config.socket_addr(), "127.0.0.1:4000");
    }

    #[test]
    fn test_set_listen_addr_ipv6() {
        let mut config = HttpServerConfig::default();
        config.set_listen_addr("[::1]:4000".parse().unwrap());

        assert_eq!(config.host, "::1");
        assert_eq!(config.socket_addr(), "[::1]:4000");

        let addr: SocketAddr = config.socket_addr().parse().unwrap();
        assert_eq!(addr.port(), 4000);
        assert!(addr.is_ipv6());
    }

    #[test]
    fn test_ipv6_host_from_file() {
        let config: HttpServerConfig =
            serde_json::from_str(r#"{"host": "::", "port": 6969}"#).unwrap();
        assert_eq!(config.socket_addr(), "[::]:6969");
    }
}
