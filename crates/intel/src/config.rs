//! Connection settings for the generative-model provider.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default Gemini API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

pub const MODEL_VAR: &str = "SHADOWOPS_MODEL";
pub const BASE_URL_VAR: &str = "SHADOWOPS_BASE_URL";

/// Provider settings. The API key is never read from or written to a config
/// file; it comes from the environment or an explicit setter.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelConfig {
    #[serde(skip)]
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Global per-request timeout. `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

impl Default for IntelConfig {
    fn default() -> Self {
        IntelConfig {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for IntelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("IntelConfig")
            .field("api_key", &key)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl IntelConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Overlay values from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_lookup(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup`. A missing key leaves `api_key` as it
    /// was, which for the defaults means empty; calls then fail and the
    /// gateway falls back.
    pub fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|v| !v.is_empty())
        {
            self.api_key = key;
        }
        if let Some(model) = lookup(MODEL_VAR).filter(|v| !v.is_empty()) {
            self.model = model;
        }
        if let Some(url) = lookup(BASE_URL_VAR).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let c = IntelConfig::default();
        assert_eq!(c.model, "gemini-3-flash-preview");
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert!(c.api_key.is_empty());
        assert!(c.timeout().is_none());
    }

    #[test]
    fn gemini_key_wins_over_generic_key() {
        let c = IntelConfig::default()
            .with_env_lookup(lookup(&[("GEMINI_API_KEY", "g-key"), ("API_KEY", "a-key")]));
        assert_eq!(c.api_key, "g-key");

        let c = IntelConfig::default().with_env_lookup(lookup(&[("API_KEY", "a-key")]));
        assert_eq!(c.api_key, "a-key");

        let c = IntelConfig::default()
            .with_env_lookup(lookup(&[("GEMINI_API_KEY", ""), ("API_KEY", "a-key")]));
        assert_eq!(c.api_key, "a-key");
    }

    #[test]
    fn model_and_base_url_overrides() {
        let c = IntelConfig::default().with_env_lookup(lookup(&[
            ("SHADOWOPS_MODEL", "gemini-2.5-pro"),
            ("SHADOWOPS_BASE_URL", "http://127.0.0.1:9"),
        ]));
        assert_eq!(c.model, "gemini-2.5-pro");
        assert_eq!(c.base_url, "http://127.0.0.1:9");
    }

    #[test]
    fn debug_redacts_key() {
        let c = IntelConfig::default().with_api_key("secret-value");
        let printed = format!("{:?}", c);
        assert!(!printed.contains("secret-value"));
        assert!(printed.contains("<redacted>"));
    }
}
