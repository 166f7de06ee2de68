use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Application configuration loaded from environment variables.
/// Every key has a default, so a bare `cargo run` talks to a local backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub port: u16,
    pub log_level: String,
    pub backend_timeout: Duration,
    pub backend_max_retries: u32,
    pub backend_retry_backoff: Duration,
    pub session_ttl: Duration,
    pub max_sessions: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL")
            .or_else(|| lookup("VITE_BACKEND_URL"))
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        Ok(Config {
            backend_url: normalize_base_url(&backend_url),
            port: parse_or(&lookup, "PORT", 3000)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            backend_timeout: Duration::from_secs(parse_or(&lookup, "BACKEND_TIMEOUT_SECS", 30)?),
            backend_max_retries: parse_or(&lookup, "BACKEND_MAX_RETRIES", 2)?,
            backend_retry_backoff: Duration::from_millis(parse_or(
                &lookup,
                "BACKEND_RETRY_BACKOFF_MS",
                200,
            )?),
            session_ttl: Duration::from_secs(parse_or(&lookup, "SESSION_TTL_SECS", 3600)?),
            max_sessions: parse_or(&lookup, "MAX_SESSIONS", 10_000)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_point_at_local_backend() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.backend_timeout, Duration::from_secs(30));
        assert_eq!(config.backend_max_retries, 2);
        assert_eq!(config.backend_retry_backoff, Duration::from_millis(200));
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.max_sessions, 10_000);
    }

    #[test]
    fn test_backend_url_prefers_primary_key_and_strips_slash() {
        let config = config_from(&[
            ("BACKEND_URL", "https://api.example.com/"),
            ("VITE_BACKEND_URL", "https://other.example.com"),
        ])
        .unwrap();
        assert_eq!(config.backend_url, "https://api.example.com");
    }

    #[test]
    fn test_vite_key_is_accepted_as_fallback() {
        let config = config_from(&[("VITE_BACKEND_URL", "http://10.0.0.5:9000")]).unwrap();
        assert_eq!(config.backend_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn test_blank_backend_url_falls_back_to_default() {
        let config = config_from(&[("BACKEND_URL", "   ")]).unwrap();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_session_limit_is_configurable() {
        let config = config_from(&[("MAX_SESSIONS", "250")]).unwrap();
        assert_eq!(config.max_sessions, 250);

        let err = config_from(&[("MAX_SESSIONS", "-1")]).unwrap_err();
        assert!(err.to_string().contains("MAX_SESSIONS"));
    }
}
