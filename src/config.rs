//! Environment-driven settings for the CLI.
//!
//! | Variable                 | Default                        |
//! |--------------------------|--------------------------------|
//! | `OPENAI_API_KEY`         | required                       |
//! | `OPENAI_BASE_URL`        | `https://api.openai.com/v1`    |
//! | `OPENAI_TIMEOUT_SECONDS` | `120`                          |
//! | `PAPER_SCOUT_MODEL`      | `gpt-4o-mini`                  |
//! | `ARXIV_BASE_URL`         | `http://export.arxiv.org/api`  |
//! | `ARXIV_TIMEOUT_SECONDS`  | `30`                           |

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::gateway::openai::{self, OpenAiAdapter};
use crate::gateway::{ProviderError, ProviderGateway, UsageSink};
use crate::llm::{LanguageModel, DEFAULT_MODEL};
use crate::pipeline::Pipeline;
use crate::search::{arxiv, ArxivClient, SearchError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("{name} must be a whole number of seconds, got {value:?}")]
    InvalidSeconds { name: &'static str, value: String },
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub openai_base_url: String,
    pub openai_timeout: Duration,
    pub model: String,
    pub arxiv_base_url: String,
    pub arxiv_timeout: Duration,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_timeout", &self.openai_timeout)
            .field("model", &self.model)
            .field("arxiv_base_url", &self.arxiv_base_url)
            .field("arxiv_timeout", &self.arxiv_timeout)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        Ok(Self {
            api_key,
            openai_base_url: non_empty("OPENAI_BASE_URL")
                .unwrap_or_else(|| openai::DEFAULT_BASE_URL.to_string()),
            openai_timeout: seconds(
                "OPENAI_TIMEOUT_SECONDS",
                non_empty("OPENAI_TIMEOUT_SECONDS"),
                openai::DEFAULT_TIMEOUT,
            )?,
            model: non_empty("PAPER_SCOUT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            arxiv_base_url: non_empty("ARXIV_BASE_URL")
                .unwrap_or_else(|| arxiv::DEFAULT_BASE_URL.to_string()),
            arxiv_timeout: seconds(
                "ARXIV_TIMEOUT_SECONDS",
                non_empty("ARXIV_TIMEOUT_SECONDS"),
                arxiv::DEFAULT_TIMEOUT,
            )?,
        })
    }

    /// Wire the arXiv client and the model gateway into a pipeline.
    pub fn build_pipeline<U: UsageSink + 'static>(
        &self,
        usage_sink: Arc<U>,
    ) -> Result<Pipeline, ConfigError> {
        let adapter =
            OpenAiAdapter::with_config(&self.api_key, &self.openai_base_url, self.openai_timeout)?;
        let gateway = Arc::new(ProviderGateway::new(adapter, usage_sink));
        let index = Arc::new(ArxivClient::with_config(
            &self.arxiv_base_url,
            self.arxiv_timeout,
        )?);

        Ok(Pipeline::new(index, LanguageModel::new(gateway, &self.model)))
    }
}

fn seconds(
    name: &'static str,
    value: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidSeconds { name, value: raw }),
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
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let settings = Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(settings.openai_timeout, Duration::from_secs(120));
        assert_eq!(settings.arxiv_base_url, "http://export.arxiv.org/api");
        assert_eq!(settings.arxiv_timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_or_blank_key_is_rejected() {
        assert!(matches!(
            Settings::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("OPENAI_API_KEY"))
        ));
        assert!(matches!(
            Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn overrides_and_bad_timeouts() {
        let settings = Settings::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PAPER_SCOUT_MODEL", "gpt-4o"),
            ("ARXIV_TIMEOUT_SECONDS", "5"),
        ]))
        .unwrap();
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.arxiv_timeout, Duration::from_secs(5));

        let err = Settings::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_TIMEOUT_SECONDS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("OPENAI_TIMEOUT_SECONDS"));
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let settings = Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-secret")])).unwrap();
        assert!(!format!("{settings:?}").contains("sk-secret"));
    }
}
