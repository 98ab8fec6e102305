//! aigit - AI-assisted git workflows
//!
//! This library turns local diffs into commit messages, branch names, pull
//! requests, reviews and explanations, and applies them with git and the
//! GitHub API.

pub mod ai;
pub mod cli;
pub mod core;
pub mod error;
pub mod github;

pub use error::{AigitError, Result};
