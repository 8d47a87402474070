//! Environment lookups shared by the `*Config::from_env` constructors.

use std::str::FromStr;
use std::time::Duration;

pub(crate) fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

pub(crate) fn millis_or(key: &str, default_ms: u64) -> Duration {
    Duration::from_millis(parse_or(key, default_ms))
}

pub(crate) fn secs_or(key: &str, default_secs: u64) -> Duration {
    Duration::from_secs(parse_or(key, default_secs))
}
