use std::time::Duration;

use serde::Deserialize;

use crate::i18n::Locale;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the remote recommendation service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bind address of the local UI surface
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port of the local UI surface
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound for every call to the remote service
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Language of labels and notices
    #[serde(default)]
    pub locale: Locale,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.locale, Locale::Zh);
    }

    #[test]
    fn test_overrides() {
        let config: Config = envy::from_iter(vec![
            ("API_URL".to_string(), "http://books.local:8080/".to_string()),
            ("LOCALE".to_string(), "en".to_string()),
            ("REQUEST_TIMEOUT_SECS".to_string(), "3".to_string()),
        ])
        .unwrap();
        assert_eq!(config.api_base(), "http://books.local:8080");
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.request_timeout_secs, 3);
    }
}
