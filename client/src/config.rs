use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every request path is appended to, e.g. `https://host/api`.
    pub base_url: String,
    /// Per-request timeout. Expiry surfaces as [`crate::ClientError::Timeout`].
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Base URL cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Base URL must start with http:// or https://".to_string());
        }

        if let Err(e) = reqwest::Url::parse(&self.base_url) {
            return Err(format!("Base URL is not a valid URL: {}", e));
        }

        if self.timeout.is_zero() {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Joins `path` onto the base URL. An empty path addresses the base itself.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.is_empty() {
            base.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new()
            .with_base_url("https://shop.example.com/api")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.base_url, "https://shop.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.base_url = "".to_string();
        assert!(config.validate().is_err());

        config.base_url = "localhost:3000/api".to_string();
        assert!(config.validate().is_err());

        config.base_url = "http://".to_string();
        assert!(config.validate().is_err());

        config.base_url = "http://localhost:3000/api".to_string();
        config.timeout = Duration::from_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_joining() {
        let config = ClientConfig::new().with_base_url("http://localhost:3000/api");
        assert_eq!(config.endpoint(""), "http://localhost:3000/api");
        assert_eq!(config.endpoint("/"), "http://localhost:3000/api/");
        assert_eq!(config.endpoint("/bikes/1"), "http://localhost:3000/api/bikes/1");
        assert_eq!(config.endpoint("contact"), "http://localhost:3000/api/contact");

        let trailing = ClientConfig::new().with_base_url("http://localhost:3000/api/");
        assert_eq!(trailing.endpoint("/bikes"), "http://localhost:3000/api/bikes");
    }

    #[test]
    fn test_serialization() {
        let config = ClientConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.base_url, deserialized.base_url);
        assert_eq!(config.timeout, deserialized.timeout);
    }
}
