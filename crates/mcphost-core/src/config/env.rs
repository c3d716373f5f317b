//! Completion endpoint settings sourced from the environment

use super::error::{ConfigError, ConfigResult};

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_API_BASE: &str = "OPENAI_API_BASE";
pub const ENV_API_MODEL: &str = "OPENAI_API_MODEL";

/// Credentials and model for the OpenAI-compatible completion API
#[derive(Clone, PartialEq, Eq)]
pub struct CompletionSettings {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl std::fmt::Debug for CompletionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl CompletionSettings {
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: api_base.into(),
            model: model.into(),
        }
    }

    /// Read all three variables from the process environment
    ///
    /// An empty value counts as missing.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| -> ConfigResult<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingEnv(key))
        };

        Ok(Self {
            api_key: require(ENV_API_KEY)?,
            api_base: require(ENV_API_BASE)?,
            model: require(ENV_API_MODEL)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_all_present() {
        let settings = CompletionSettings::from_lookup(lookup_from(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_API_BASE, "https://api.example.com/v1"),
            (ENV_API_MODEL, "gpt-4o-mini"),
        ]))
        .unwrap();

        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.api_base, "https://api.example.com/v1");
        assert_eq!(settings.model, "gpt-4o-mini");
    }

    #[test]
    fn test_missing_variable_is_named() {
        let err = CompletionSettings::from_lookup(lookup_from(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_API_MODEL, "gpt-4o-mini"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(ENV_API_BASE)));
    }

    #[test]
    fn test_empty_counts_as_missing() {
        let err = CompletionSettings::from_lookup(lookup_from(&[
            (ENV_API_KEY, "  "),
            (ENV_API_BASE, "https://api.example.com/v1"),
            (ENV_API_MODEL, "gpt-4o-mini"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = CompletionSettings::new("sk-secret", "http://x", "m");
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
