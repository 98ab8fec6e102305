//! Credential lookup for the generation endpoint and GitHub
//!
//! Credentials live in the configuration file. For development and CI they
//! can be overridden with environment variables:
//! - `OPENAI_API_KEY` - generation endpoint API key
//! - `GITHUB_TOKEN` - GitHub token used to open pull requests
//!
//! Priority: env var > config file

use secrecy::{ExposeSecret, SecretString};

use crate::core::config::Config;
use crate::error::{AigitError, Result};

/// Environment variable overriding `openai_api_key`
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding `github_token`
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Credential lookup helpers
pub struct CredentialStore;

impl CredentialStore {
    /// Retrieve the GitHub token
    ///
    /// Priority: environment variable > config
    pub fn github_token(config: &Config) -> Option<SecretString> {
        Self::pick(read_env(GITHUB_TOKEN_ENV), &config.github_token)
    }

    /// Get the GitHub token, returning an error if not configured
    pub fn require_github_token(config: &Config) -> Result<SecretString> {
        Self::github_token(config).ok_or(AigitError::MissingCredential {
            name: "GitHub token",
            config_key: "github_token",
            env_var: GITHUB_TOKEN_ENV,
        })
    }

    /// Choose between an environment override and a stored value
    pub fn pick(env_value: Option<String>, stored: &str) -> Option<SecretString> {
        env_value
            .filter(|v| !v.is_empty())
            .or_else(|| (!stored.is_empty()).then(|| stored.to_string()))
            .map(SecretString::from)
    }

    /// Get a masked version of a token for display (shows first 4 and last 4 chars)
    pub fn mask_token(token: &str) -> String {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        }
    }

    /// Masked display of a secret
    pub fn mask_secret(token: &SecretString) -> String {
        Self::mask_token(token.expose_secret())
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
