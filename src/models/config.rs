//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

fn default_api_timeout_secs() -> u64 {
    10
}

fn default_search_debounce_ms() -> u64 {
    500
}

fn default_query_cache_ttl_secs() -> u64 {
    crate::query::cache::DEFAULT_TTL.as_secs()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Root of the gym REST API, e.g. `http://localhost:9090/rockgymapp/api`.
    pub api_base_url: String,
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,
    pub templates_dir: String,
    pub secret: String,
    /// Quiet period of the members search box.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_query_cache_ttl_secs")]
    pub query_cache_ttl_secs: u64,
}

impl ServerConfig {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn query_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.query_cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use config::{Config, File, FileFormat};

    use super::*;

    #[test]
    fn optional_settings_fall_back_to_defaults() {
        let yaml = r#"
domain: localhost
address: 127.0.0.1
port: 8080
api_base_url: http://localhost:9090/rockgymapp/api
templates_dir: templates/**/*
secret: "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef"
"#;
        let config: ServerConfig = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .and_then(Config::try_deserialize)
            .unwrap();

        assert_eq!(config.api_timeout(), Duration::from_secs(10));
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert_eq!(config.query_cache_ttl(), Duration::from_secs(30));
    }
}
