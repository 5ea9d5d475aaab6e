use crate::error::{LithoError, Result};
use std::env;

pub const API_URL_ENV: &str = "LITHO_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `LITHO_API_URL`, falling back to the local development backend.
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        ClientConfig { base_url }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(LithoError::ConfigError("API base URL is required".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(LithoError::ConfigError(format!(
                "API base URL must start with http:// or https://, got '{}'",
                url
            )));
        }
        Ok(())
    }

    /// Joins `path` onto the base URL without doubling the slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        let config = ClientConfig::new();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_joining() {
        let config = ClientConfig::new().with_base_url("https://litho.example.com/");
        assert_eq!(
            config.endpoint("/api/generate-3d/"),
            "https://litho.example.com/api/generate-3d/"
        );
        assert_eq!(config.endpoint("health"), "https://litho.example.com/health");
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        assert!(matches!(
            ClientConfig::new().with_base_url("  ").validate(),
            Err(LithoError::ConfigError(_))
        ));
        assert!(matches!(
            ClientConfig::new().with_base_url("localhost:8000").validate(),
            Err(LithoError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_env() {
        env::set_var(API_URL_ENV, "http://10.0.0.5:9000");
        assert_eq!(ClientConfig::from_env().base_url, "http://10.0.0.5:9000");

        env::remove_var(API_URL_ENV);
        assert_eq!(ClientConfig::from_env().base_url, DEFAULT_API_URL);
    }
}
