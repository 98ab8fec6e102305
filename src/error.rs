//! Custom error types for aigit
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the aigit application
#[derive(Error, Debug)]
pub enum AigitError {
    /// Not running in a git repository
    #[error("This directory is not a git repository.\n\n  → Run 'git init' to create one, or navigate to an existing git project.")]
    NotGitRepository,

    /// Nothing to act on
    #[error("{0}")]
    NoChanges(String),

    /// A required credential is not configured
    #[error("{name} not found.\n\n  → Set it with: aigit config set {config_key} <value>\n  → Or set the {env_var} environment variable.")]
    MissingCredential {
        /// Human-readable credential name
        name: &'static str,
        /// Configuration key holding the credential
        config_key: &'static str,
        /// Environment variable that overrides the configuration
        env_var: &'static str,
    },

    /// No `origin` remote configured
    #[error("No remote origin URL found.\n\n  → Run 'git remote -v' to check your remotes.\n  → Example: git remote add origin https://github.com/user/repo.git")]
    NoRemote,

    /// Remote URL is not a GitHub SSH or HTTPS URL
    #[error("Could not parse GitHub URL: {0}\n\n  → Expected format: https://github.com/owner/repo.git or git@github.com:owner/repo.git")]
    InvalidRemoteUrl(String),

    /// Text-generation endpoint failed or returned something unusable
    #[error("AI generation failed: {0}\n\n  → Check 'aigit config list' for the provider, model and base_url in use.")]
    Generation(String),

    /// git2 operation error
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    /// `git` subprocess rejected the operation
    #[error("Git operation failed: {0}")]
    GitCommand(String),

    /// Revision could not be resolved to a commit
    #[error("Could not find commit or branch: {0}")]
    RevisionNotFound(String),

    /// HEAD does not point at a branch
    #[error("HEAD is detached, not on a branch.\n\n  → Run 'git switch <branch>' first.")]
    NotOnBranch,

    /// GitHub API error
    #[error("GitHub API request failed: {0}\n\n  → Check your internet connection and your github_token.")]
    GitHubApi(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal interaction failed
    #[error("Terminal prompt failed: {0}")]
    Prompt(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),

    /// Operation cancelled by user
    #[error("Operation cancelled.")]
    Cancelled,
}

impl From<toml::de::Error> for AigitError {
    fn from(err: toml::de::Error) -> Self {
        AigitError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for AigitError {
    fn from(err: toml::ser::Error) -> Self {
        AigitError::Toml(err.to_string())
    }
}

impl From<dialoguer::Error> for AigitError {
    fn from(err: dialoguer::Error) -> Self {
        AigitError::Prompt(err.to_string())
    }
}

impl From<octocrab::Error> for AigitError {
    fn from(err: octocrab::Error) -> Self {
        crate::github::error_handler::classify_github_error(err)
    }
}

/// Result type alias using AigitError
pub type Result<T> = std::result::Result<T, AigitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message_names_both_sources() {
        let err = AigitError::MissingCredential {
            name: "OpenAI API key",
            config_key: "openai_api_key",
            env_var: "OPENAI_API_KEY",
        };
        let msg = err.to_string();
        assert!(msg.starts_with("OpenAI API key not found."));
        assert!(msg.contains("aigit config set openai_api_key <value>"));
        assert!(msg.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_no_changes_message_is_verbatim() {
        let err = AigitError::NoChanges("No staged changes to commit.".to_string());
        assert_eq!(err.to_string(), "No staged changes to commit.");
    }
}
