//! GitHub API client wrapper using octocrab

use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};

use crate::core::repository::RemoteRepository;
use crate::error::Result;

/// GitHub API client wrapper
///
/// Bound to the repository behind the `origin` remote.
pub struct GitHubClient {
    /// The octocrab instance
    inner: Octocrab,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl GitHubClient {
    /// Create a new GitHub client for the given repository
    ///
    /// The token is resolved by the caller, see
    /// [`CredentialStore::require_github_token`](crate::core::CredentialStore::require_github_token).
    pub fn new(remote: &RemoteRepository, token: SecretString) -> Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(token.expose_secret().to_string())
            .build()?;

        Ok(Self {
            inner: octocrab,
            owner: remote.owner.clone(),
            repo: remote.name.clone(),
        })
    }

    /// Get pulls handler for this repository
    pub fn pulls(&self) -> octocrab::pulls::PullRequestHandler<'_> {
        self.inner.pulls(&self.owner, &self.repo)
    }

    /// Web URL of a pull request in this repository
    pub fn pull_request_url(&self, number: u64) -> String {
        format!(
            "https://github.com/{}/{}/pull/{}",
            self.owner, self.repo, number
        )
    }
}
