//! Caption service (Gemini) configuration.

use serde::{Deserialize, Serialize};

/// Unprefixed env vars consulted when `caption.api_key` is empty, in order.
pub const API_KEY_FALLBACK_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

fn default_model() -> String {
    String::from("gemini-2.5-flash")
}

fn default_endpoint() -> String {
    String::from("https://generativelanguage.googleapis.com/v1beta")
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptionConfig {
    /// Generative language API key.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL; requests go to `{endpoint}/models/{model}:generateContent`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CaptionConfig {
    /// An API key is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Fill an empty `api_key` from the first non-empty fallback variable.
    ///
    /// `lookup` abstracts the environment so callers and tests can inject it.
    pub fn fill_api_key_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.is_configured() {
            return;
        }
        if let Some(key) = API_KEY_FALLBACK_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
        {
            self.api_key = key;
        }
    }

    /// [`fill_api_key_with`](Self::fill_api_key_with) over the process environment.
    pub fn fill_api_key_from_env(&mut self) {
        self.fill_api_key_with(|name| std::env::var(name).ok());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn default_is_not_configured() {
        let config = CaptionConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn fallback_prefers_api_key_var() {
        let vars = env(&[("API_KEY", "first"), ("GEMINI_API_KEY", "second")]);
        let mut config = CaptionConfig::default();
        config.fill_api_key_with(|name| vars.get(name).cloned());
        assert_eq!(config.api_key, "first");
    }

    #[test]
    fn fallback_skips_blank_values() {
        let vars = env(&[("API_KEY", "  "), ("GEMINI_API_KEY", "second")]);
        let mut config = CaptionConfig::default();
        config.fill_api_key_with(|name| vars.get(name).cloned());
        assert_eq!(config.api_key, "second");
    }

    #[test]
    fn explicit_key_is_kept() {
        let vars = env(&[("API_KEY", "from-env")]);
        let mut config = CaptionConfig {
            api_key: "from-toml".into(),
            ..Default::default()
        };
        config.fill_api_key_with(|name| vars.get(name).cloned());
        assert_eq!(config.api_key, "from-toml");
    }

    #[test]
    fn no_fallback_leaves_key_empty() {
        let mut config = CaptionConfig::default();
        config.fill_api_key_with(|_| None);
        assert!(!config.is_configured());
    }
}
