//! Remote repository detection
//!
//! Extracts the GitHub owner and repository name from the `origin` remote.

use url::Url;

use crate::core::git::GitRepository;
use crate::error::{AigitError, Result};

const SSH_PREFIX: &str = "git@github.com:";
const GITHUB_HOST: &str = "github.com";

/// GitHub repository identified by the origin remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RemoteRepository {
    /// Detect the remote repository of a local checkout
    pub fn from_git(git: &GitRepository) -> Result<Self> {
        let url = git.remote_url().ok_or(AigitError::NoRemote)?;
        parse_remote(&url).ok_or(AigitError::InvalidRemoteUrl(url))
    }

    /// Get the full repository name (owner/name)
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Parse a GitHub remote URL into owner and repository name
///
/// Supports exactly two shapes:
/// - `git@github.com:owner/repo.git`
/// - `https://github.com/owner/repo.git`
///
/// The `.git` suffix is optional. Anything else yields `None`.
pub fn parse_remote(url: &str) -> Option<RemoteRepository> {
    let url = url.trim();

    if let Some(path) = url.strip_prefix(SSH_PREFIX) {
        return parse_owner_repo_path(path);
    }

    let parsed = Url::parse(url).ok()?;
    if parsed.scheme() == "https" && parsed.host_str() == Some(GITHUB_HOST) {
        return parse_owner_repo_path(parsed.path().trim_start_matches('/'));
    }

    None
}

/// Parse owner/repo from a path string
fn parse_owner_repo_path(path: &str) -> Option<RemoteRepository> {
    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let mut parts = path.split('/');
    let owner = parts.next()?;
    let name = parts.next()?;

    if owner.is_empty() || name.is_empty() {
        return None;
    }

    Some(RemoteRepository {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(url: &str) -> Option<(String, String)> {
        parse_remote(url).map(|r| (r.owner, r.name))
    }

    #[test]
    fn test_parse_ssh_url() {
        assert_eq!(
            pair("git@github.com:acme/widgets.git"),
            Some(("acme".into(), "widgets".into()))
        );
    }

    #[test]
    fn test_parse_https_url() {
        assert_eq!(
            pair("https://github.com/acme/widgets.git"),
            Some(("acme".into(), "widgets".into()))
        );
    }

    #[test]
    fn test_parse_urls_without_git_suffix() {
        assert_eq!(
            pair("https://github.com/acme/widgets"),
            Some(("acme".into(), "widgets".into()))
        );
        assert_eq!(
            pair("git@github.com:acme/widgets"),
            Some(("acme".into(), "widgets".into()))
        );
    }

    #[test]
    fn test_other_hosts_and_shapes_do_not_match() {
        assert_eq!(pair("https://gitlab.com/acme/widgets.git"), None);
        assert_eq!(pair("git@gitlab.com:acme/widgets.git"), None);
        assert_eq!(pair("not-a-url"), None);
        assert_eq!(pair("https://github.com/acme"), None);
        assert_eq!(pair("git@github.com:/widgets.git"), None);
    }

    #[test]
    fn test_full_name() {
        let remote = parse_remote("git@github.com:acme/widgets.git").unwrap();
        assert_eq!(remote.full_name(), "acme/widgets");
    }

    #[test]
    fn test_from_git_without_origin() {
        let dir = tempfile::tempdir().unwrap();
        git2::Repository::init(dir.path()).unwrap();
        let git = GitRepository::discover(dir.path()).unwrap();
        assert!(matches!(
            RemoteRepository::from_git(&git),
            Err(AigitError::NoRemote)
        ));
    }

    #[test]
    fn test_from_git_with_unparsable_origin() {
        let dir = tempfile::tempdir().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        repo.remote("origin", "https://gitlab.com/acme/widgets.git")
            .unwrap();
        let git = GitRepository::discover(dir.path()).unwrap();
        assert!(matches!(
            RemoteRepository::from_git(&git),
            Err(AigitError::InvalidRemoteUrl(url)) if url.contains("gitlab")
        ));
    }
}
