//! Client configuration read from the environment.

use std::time::Duration;

use crate::gate::DEFAULT_MIN_LOADING;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_VAR: &str = "TODO_API_URL";
pub const MIN_LOADING_VAR: &str = "TODO_MIN_LOADING_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub min_loading: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            min_loading: DEFAULT_MIN_LOADING,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup(BASE_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);

        let min_loading = match lookup(MIN_LOADING_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "ignoring invalid {}", MIN_LOADING_VAR);
                    defaults.min_loading
                }
            },
            None => defaults.min_loading,
        };

        Self {
            base_url,
            min_loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.min_loading, Duration::from_secs(1));
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://todos.example.com"),
            (MIN_LOADING_VAR, "250"),
        ]));
        assert_eq!(config.base_url, "https://todos.example.com");
        assert_eq!(config.min_loading, Duration::from_millis(250));
    }

    #[test]
    fn blank_url_and_bad_duration_fall_back() {
        let config = ClientConfig::from_lookup(lookup(&[(BASE_URL_VAR, "  "), (MIN_LOADING_VAR, "soon")]));
        assert_eq!(config, ClientConfig::default());
    }
}
