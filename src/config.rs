use std::env;
use std::net::SocketAddr;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Credential for the generative-language API. A missing key is reported
    /// per request instead of aborting startup.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
}

impl AppConfig {
    /// Reads the process environment. `main` loads `.env` beforehand.
    pub fn from_env() -> Self {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid PORT value {:?}, falling back to 8501", raw);
                8501
            }),
            Err(_) => 8501,
        };

        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            api_key: env::var("API_KEY").ok().filter(|key| !key.is_empty()),
            api_base: env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind_addr, self.port).parse()?;
        Ok(addr)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8501,
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_endpoint() {
        let config = AppConfig::default();
        assert_eq!(config.model, "gemini-2.0-flash-lite");
        assert!(config.api_base.ends_with("/v1beta"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = AppConfig {
            bind_addr: "127.0.0.1".to_string(),
            port: 9000,
            ..AppConfig::default()
        };
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.port(), 9000);
        assert!(addr.ip().is_loopback());
    }
}
