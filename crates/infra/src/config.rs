//! Configuration loading and representation.
//!
//! All settings come from environment variables; `from_lookup` takes any
//! variable source so tests don't touch the process environment.

use core::fmt::Display;
use core::str::FromStr;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use courseware_auth::ApiKey;
use courseware_observability::LogFormat;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub api_key: Option<ApiKey>,
    /// Allows unauthenticated access when no API key is configured.
    pub debug: bool,
    pub content_snapshot: Option<PathBuf>,
    /// Scheme and host used for `uri` fields; falls back to the `Host` header.
    pub public_base_url: Option<String>,
    /// Mount prefix for all routes (`""` or `/segment[/segment...]`).
    pub base_path: String,
    pub max_depth: u32,
    pub page_size: usize,
    pub max_page_size: usize,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            api_key: None,
            debug: false,
            content_snapshot: None,
            public_base_url: None,
            base_path: String::new(),
            max_depth: 32,
            page_size: 10,
            max_page_size: 100,
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let public_base_url = get("PUBLIC_BASE_URL")
            .map(|raw| normalize_base_url("PUBLIC_BASE_URL", &raw))
            .transpose()?;

        let config = Self {
            bind_addr: parse_var(&get, "BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            api_key: get("API_KEY").and_then(ApiKey::new),
            debug: get("DEBUG")
                .map(|raw| parse_bool("DEBUG", &raw))
                .transpose()?
                .unwrap_or(defaults.debug),
            content_snapshot: get("CONTENT_SNAPSHOT").map(PathBuf::from),
            public_base_url,
            base_path: get("API_BASE_PATH")
                .map(|raw| normalize_base_path(&raw))
                .unwrap_or(defaults.base_path),
            max_depth: parse_var(&get, "MAX_DEPTH")?.unwrap_or(defaults.max_depth),
            page_size: parse_var(&get, "PAGE_SIZE")?.unwrap_or(defaults.page_size),
            max_page_size: parse_var(&get, "MAX_PAGE_SIZE")?.unwrap_or(defaults.max_page_size),
            log_format: parse_var(&get, "LOG_FORMAT")?.unwrap_or(defaults.log_format),
        };

        if config.page_size == 0 {
            return Err(invalid("PAGE_SIZE", "0", "must be positive"));
        }
        if config.max_page_size < config.page_size {
            return Err(invalid(
                "MAX_PAGE_SIZE",
                &config.max_page_size.to_string(),
                "must be at least PAGE_SIZE",
            ));
        }
        Ok(config)
    }
}

fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_var<T>(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    get(var)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| invalid(var, &raw, e.to_string()))
        })
        .transpose()
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(var, raw, "expected true or false")),
    }
}

fn normalize_base_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(invalid(var, raw, "must start with http:// or https://"));
    }
    Ok(trimmed.to_string())
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.api_key.is_none());
        assert!(!config.debug);
        assert_eq!(config.base_path, "");
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn reads_and_normalizes_values() {
        let config = load(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("API_KEY", "s3cret"),
            ("DEBUG", "yes"),
            ("PUBLIC_BASE_URL", "https://lms.example.com/"),
            ("API_BASE_PATH", "api/course_api/v0/"),
            ("MAX_DEPTH", "5"),
            ("PAGE_SIZE", "25"),
            ("LOG_FORMAT", "pretty"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9000");
        assert!(config.api_key.unwrap().matches("s3cret"));
        assert!(config.debug);
        assert_eq!(config.public_base_url.as_deref(), Some("https://lms.example.com"));
        assert_eq!(config.base_path, "/api/course_api/v0");
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_invalid_values() {
        for vars in [
            vec![("MAX_DEPTH", "deep")],
            vec![("DEBUG", "maybe")],
            vec![("PUBLIC_BASE_URL", "lms.example.com")],
            vec![("PAGE_SIZE", "0")],
            vec![("PAGE_SIZE", "50"), ("MAX_PAGE_SIZE", "20")],
            vec![("LOG_FORMAT", "xml")],
        ] {
            let err = load(&vars).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{vars:?}");
        }
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[("API_KEY", "  "), ("MAX_DEPTH", "")]).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.max_depth, 32);
    }
}
