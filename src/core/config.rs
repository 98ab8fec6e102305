//! Application configuration management
//!
//! Handles loading and saving the user's settings file:
//! - Generation provider, model and endpoint override
//! - API credentials (masked on display)
//! - Workflow preferences (conventional commits, auto staging, prompts)
//!
//! The file is read fresh for every command and written back immediately
//! on every `config set`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::credentials::CredentialStore;
use crate::error::{AigitError, Result};

/// Environment variable that points at an alternative config file
pub const CONFIG_PATH_ENV: &str = "AIGIT_CONFIG";

/// Keys whose values are parsed as booleans by `set_value`
const BOOL_KEYS: &[&str] = &["conventional_commits", "auto_stage", "interactive"];

/// Text-generation provider profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI cloud API (default)
    #[default]
    OpenAi,
    /// Local Ollama server
    Ollama,
    /// Local llama.cpp server
    LlamaCpp,
    /// Local vLLM server
    Vllm,
    /// OpenRouter
    OpenRouter,
    /// Any other OpenAI-compatible endpoint (requires `base_url`)
    Custom,
}

impl Provider {
    /// Get the configuration name
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Ollama => "ollama",
            Provider::LlamaCpp => "llamacpp",
            Provider::Vllm => "vllm",
            Provider::OpenRouter => "openrouter",
            Provider::Custom => "custom",
        }
    }

    /// Parse from the configuration name
    pub fn from_name(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
    }

    /// Get all available providers
    pub fn all() -> &'static [Provider] {
        &[
            Provider::OpenAi,
            Provider::Ollama,
            Provider::LlamaCpp,
            Provider::Vllm,
            Provider::OpenRouter,
            Provider::Custom,
        ]
    }

    /// Profile base URL, if the profile fixes one
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            Provider::OpenAi | Provider::Custom => None,
            Provider::Ollama => Some("http://localhost:11434/v1"),
            Provider::LlamaCpp => Some("http://localhost:8080/v1"),
            Provider::Vllm => Some("http://localhost:8000/v1"),
            Provider::OpenRouter => Some("https://openrouter.ai/api/v1"),
        }
    }

    /// Whether the endpoint rejects calls without an API key
    pub fn requires_api_key(&self) -> bool {
        matches!(
            self,
            Provider::OpenAi | Provider::OpenRouter | Provider::Custom
        )
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API key for the generation endpoint
    #[serde(default)]
    pub openai_api_key: String,

    /// Token used to create pull requests
    #[serde(default)]
    pub github_token: String,

    /// Model identifier sent to the endpoint
    #[serde(default = "default_model")]
    pub model: String,

    /// Ask for Conventional Commits formatted messages
    #[serde(default = "default_true")]
    pub conventional_commits: bool,

    /// Stage everything before `aigit commit`
    #[serde(default)]
    pub auto_stage: bool,

    /// Confirm generated artifacts before applying them
    #[serde(default = "default_true")]
    pub interactive: bool,

    /// Active provider profile
    #[serde(default, deserialize_with = "deserialize_provider")]
    pub provider: Provider,

    /// Endpoint override, empty means the provider default
    #[serde(default)]
    pub base_url: String,

    /// Keys aigit does not interpret, kept so they round-trip
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

/// Unrecognized provider names load as the `custom` profile so a stale
/// file never blocks `config set provider`
fn deserialize_provider<'de, D>(deserializer: D) -> std::result::Result<Provider, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(Provider::from_name(&name).unwrap_or(Provider::Custom))
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            github_token: String::new(),
            model: default_model(),
            conventional_commits: true,
            auto_stage: false,
            interactive: true,
            provider: Provider::default(),
            base_url: String::new(),
            extra: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from file, or defaults if it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        let project_dirs = ProjectDirs::from("com", "aigit", "aigit")
            .ok_or_else(|| AigitError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Set a value from its string form, as typed on the command line
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "openai_api_key" => self.openai_api_key = value.to_string(),
            "github_token" => self.github_token = value.to_string(),
            "model" => self.model = value.to_string(),
            "base_url" => self.base_url = value.trim().to_string(),
            "conventional_commits" => self.conventional_commits = parse_bool(value),
            "auto_stage" => self.auto_stage = parse_bool(value),
            "interactive" => self.interactive = parse_bool(value),
            "provider" => {
                self.provider = Provider::from_name(value).ok_or_else(|| {
                    AigitError::InvalidInput(format!(
                        "Invalid provider '{}'. Available providers: {}",
                        value,
                        Provider::all()
                            .iter()
                            .map(|p| p.name())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))
                })?;
            }
            other => {
                if other.trim().is_empty() {
                    return Err(AigitError::InvalidInput(
                        "Configuration key cannot be empty".to_string(),
                    ));
                }
                self.extra
                    .insert(other.to_string(), toml::Value::String(value.to_string()));
            }
        }
        Ok(())
    }

    /// Get a value in its display form, `None` if the key is unknown
    pub fn get_value(&self, key: &str) -> Option<String> {
        let value = match key {
            "openai_api_key" => self.openai_api_key.clone(),
            "github_token" => self.github_token.clone(),
            "model" => self.model.clone(),
            "base_url" => self.base_url.clone(),
            "conventional_commits" => self.conventional_commits.to_string(),
            "auto_stage" => self.auto_stage.to_string(),
            "interactive" => self.interactive.to_string(),
            "provider" => self.provider.name().to_string(),
            other => return self.extra.get(other).map(display_toml_value),
        };
        Some(value)
    }

    /// All keys with their display values, sorted by key
    pub fn entries(&self) -> Vec<(String, String)> {
        let known = [
            "auto_stage",
            "base_url",
            "conventional_commits",
            "github_token",
            "interactive",
            "model",
            "openai_api_key",
            "provider",
        ];

        let mut entries: Vec<(String, String)> = known
            .iter()
            .filter_map(|k| self.get_value(k).map(|v| (k.to_string(), v)))
            .chain(
                self.extra
                    .iter()
                    .map(|(k, v)| (k.clone(), display_toml_value(v))),
            )
            .collect();

        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

/// Parse a boolean the way `config set` accepts it
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Whether a key holds a secret that must be masked on display
pub fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_lowercase();
    key.contains("key") || key.contains("token")
}

/// Display form of a value, with secrets masked
pub fn display_value(key: &str, value: &str) -> String {
    if is_sensitive_key(key) && !value.is_empty() {
        CredentialStore::mask_token(value)
    } else {
        value.to_string()
    }
}

fn display_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
