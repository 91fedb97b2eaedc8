use std::time::Duration;

use crate::error::GatewayError;

/// Backend address used when `AUDIT_API_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Request timeout used when `AUDIT_API_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the audit backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Applied to every request, connect through body.
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    /// Build a config for `base_url` with the default timeout.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, GatewayError> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            ..Self::default()
        })
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                  |
    /// |--------------------------|--------------------------|
    /// | `AUDIT_API_BASE_URL`     | `http://127.0.0.1:8000`  |
    /// | `AUDIT_API_TIMEOUT_SECS` | `30`                     |
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GatewayError> {
        let base_url = match lookup("AUDIT_API_BASE_URL") {
            Some(raw) => normalize_base_url(&raw)?,
            None => DEFAULT_BASE_URL.to_string(),
        };

        let request_timeout = match lookup("AUDIT_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    GatewayError::Config(format!(
                        "AUDIT_API_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(GatewayError::Config(
                        "AUDIT_API_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url,
            request_timeout,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, GatewayError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());

    if !has_host {
        return Err(GatewayError::Config(format!(
            "Backend base URL must be an http(s) URL, got '{raw}'"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = GatewayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, GatewayConfig::default());
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_overrides() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("AUDIT_API_BASE_URL", "https://audit.internal:9000/"),
            ("AUDIT_API_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://audit.internal:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_non_http_url() {
        let err = GatewayConfig::from_lookup(lookup(&[("AUDIT_API_BASE_URL", "ftp://x")]))
            .unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
        assert!(GatewayConfig::new("http://").is_err());
    }

    #[test]
    fn rejects_bad_timeout() {
        for raw in ["abc", "0", "-3"] {
            let result =
                GatewayConfig::from_lookup(lookup(&[("AUDIT_API_TIMEOUT_SECS", raw)]));
            assert!(result.is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn new_and_with_timeout() {
        let config = GatewayConfig::new("http://localhost:8000///")
            .unwrap()
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout, Duration::from_millis(250));
    }
}
