//! Application configuration loaded from environment variables.

use std::env;

use folio_infra::services::{SearchConfig, VotingConfig};
use folio_infra::{CacheConfig, StorageConfig, ToastConfig};

#[cfg(feature = "http")]
use folio_infra::HttpConfig;

use crate::background::SchedulerConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend to talk to; `None` uses the seeded in-memory catalogue.
    #[cfg(feature = "http")]
    pub http: Option<HttpConfig>,
    pub storage: StorageConfig,
    pub cache: CacheConfig,
    pub voting: VotingConfig,
    pub search: SearchConfig,
    pub toast: ToastConfig,
    pub scheduler: SchedulerConfig,
    /// OS colour preference used by the `system` colour mode.
    pub system_dark: bool,
    /// Public origin used to build share links.
    pub site_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            #[cfg(feature = "http")]
            http: None,
            storage: StorageConfig::default(),
            cache: CacheConfig::default(),
            voting: VotingConfig::default(),
            search: SearchConfig::default(),
            toast: ToastConfig::default(),
            scheduler: SchedulerConfig::default(),
            system_dark: false,
            site_url: DEFAULT_SITE_URL.to_string(),
        }
    }
}

const DEFAULT_SITE_URL: &str = "http://localhost:5173";

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            #[cfg(feature = "http")]
            http: HttpConfig::from_env(),
            storage: StorageConfig::from_env(),
            cache: CacheConfig::from_env(),
            voting: VotingConfig::from_env(),
            search: SearchConfig::from_env(),
            toast: ToastConfig::default(),
            scheduler: SchedulerConfig::from_env(),
            system_dark: env::var("FOLIO_SYSTEM_DARK")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            site_url: env::var("FOLIO_SITE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_SITE_URL.to_string()),
        }
    }
}

/// `1`, `true`, `yes` and `dark` (any case) read as set.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "dark"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" dark "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("light"));
    }

    #[test]
    fn test_defaults_match_documented_timings() {
        let config = AppConfig::default();
        assert_eq!(config.cache.ttl.as_secs(), 900);
        assert_eq!(config.voting.debounce.as_millis(), 300);
        assert_eq!(config.search.debounce.as_millis(), 200);
        assert_eq!(config.scheduler.cache_sweep_cron, "0 */5 * * * *");
    }
}
