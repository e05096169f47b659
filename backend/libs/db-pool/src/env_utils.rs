//! Environment variable parsing utilities
//!
//! Safe parsing with defaults so pool tuning never needs `unwrap()`.

use std::str::FromStr;

/// Parse an environment variable with a default fallback
///
/// Missing and unparsable values both yield `default`.
///
/// # Example
/// ```ignore
/// let timeout: u64 = parse_env_with_default("DB_ACQUIRE_TIMEOUT_SECS", 10);
/// ```
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    parse_env_optional(key).unwrap_or(default)
}

/// Parse an environment variable, returning None if missing or invalid
pub fn parse_env_optional<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
