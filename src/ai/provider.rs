//! Provider profile resolution
//!
//! Turns the configured provider, base URL override and credentials into the
//! concrete endpoint settings the generation client uses.

use secrecy::SecretString;

use crate::core::config::{Config, Provider};
use crate::core::credentials::{CredentialStore, OPENAI_API_KEY_ENV};
use crate::error::{AigitError, Result};

/// Endpoint used by the OpenAI profile when no override is configured
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Credential sent to endpoints that do not check one
pub const PLACEHOLDER_API_KEY: &str = "not-needed";

/// Concrete endpoint settings for one generation call
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Active profile
    pub provider: Provider,
    /// Base URL of the OpenAI-compatible API (without trailing slash)
    pub base_url: String,
    /// Bearer credential
    pub api_key: SecretString,
    /// Model identifier
    pub model: String,
}

impl ProviderSettings {
    /// Resolve settings from configuration and the process environment
    pub fn from_config(config: &Config) -> Result<Self> {
        let env_key = std::env::var(OPENAI_API_KEY_ENV).ok();
        Self::resolve(config, env_key)
    }

    /// Resolve settings from configuration and an explicit env override
    ///
    /// A non-empty `base_url` always wins over the profile default. The env
    /// key wins over the stored key. Profiles that need no credential get a
    /// placeholder so the request is never rejected for lacking one.
    pub fn resolve(config: &Config, env_key: Option<String>) -> Result<Self> {
        let provider = config.provider;

        let base_url = Some(config.base_url.trim())
            .filter(|url| !url.is_empty())
            .or_else(|| provider.default_base_url())
            .or_else(|| (provider == Provider::OpenAi).then_some(OPENAI_API_BASE))
            .ok_or_else(|| {
                AigitError::Config(format!(
                    "Provider '{}' has no default endpoint.\n\n  → Set one with: aigit config set base_url <url>",
                    provider
                ))
            })?
            .trim_end_matches('/')
            .to_string();

        let api_key = match CredentialStore::pick(env_key, &config.openai_api_key) {
            Some(key) => key,
            None if !provider.requires_api_key() => SecretString::from(PLACEHOLDER_API_KEY),
            None => {
                return Err(AigitError::MissingCredential {
                    name: "OpenAI API key",
                    config_key: "openai_api_key",
                    env_var: OPENAI_API_KEY_ENV,
                })
            }
        };

        Ok(Self {
            provider,
            base_url,
            api_key,
            model: config.model.clone(),
        })
    }
}
