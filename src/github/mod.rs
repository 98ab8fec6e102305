//! GitHub API integration module
//!
//! This module provides the GitHub side of the `pr` command:
//! - Authenticated client for the origin repository
//! - Pull request creation
//! - Error classification

pub mod client;
pub mod error_handler;
pub mod pull_request;

pub use client::GitHubClient;
pub use error_handler::{classify_github_error, open_browser};
pub use pull_request::{CreatePrParams, CreatedPr, PullRequestHandler};
