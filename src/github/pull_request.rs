//! Pull request operations

use tracing::debug;

use crate::error::Result;
use crate::github::client::GitHubClient;

/// Parameters for creating a pull request
#[derive(Debug, Clone)]
pub struct CreatePrParams {
    /// Head branch (source branch with changes)
    pub head: String,
    /// Base branch (target branch to merge into)
    pub base: String,
    /// PR title
    pub title: String,
    /// PR body/description
    pub body: Option<String>,
    /// Create as draft
    pub draft: bool,
}

/// A pull request that was just opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPr {
    pub number: u64,
    /// Web URL of the PR
    pub url: String,
    pub title: String,
}

/// Pull request operations handler
pub struct PullRequestHandler<'a> {
    client: &'a GitHubClient,
}

impl<'a> PullRequestHandler<'a> {
    /// Create a new handler
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Create a new pull request
    pub async fn create(&self, params: CreatePrParams) -> Result<CreatedPr> {
        debug!(
            "Creating PR {} -> {} on {}/{} (draft={})",
            params.head, params.base, self.client.owner, self.client.repo, params.draft
        );

        let pulls_handler = self.client.pulls();
        let mut builder = pulls_handler.create(&params.title, &params.head, &params.base);

        if let Some(body) = params.body.as_deref().filter(|b| !b.trim().is_empty()) {
            builder = builder.body(body);
        }

        if params.draft {
            builder = builder.draft(true);
        }

        let pr = builder.send().await?;

        Ok(CreatedPr {
            number: pr.number,
            url: pr
                .html_url
                .map(|url| url.to_string())
                .unwrap_or_else(|| self.client.pull_request_url(pr.number)),
            title: pr.title.unwrap_or(params.title),
        })
    }
}
