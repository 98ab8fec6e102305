//! CLI command definitions using clap
//!
//! Defines the command structure for the `aigit` CLI tool.

use clap::{Parser, Subcommand};

/// aigit - AI-assisted git workflows
///
/// Generates commit messages, branch names, pull requests, reviews and
/// explanations from your diffs.
#[derive(Parser, Debug)]
#[command(name = "aigit", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a commit message for staged changes and commit
    Commit(CommitArgs),

    /// Generate a branch name and switch to the new branch
    Branch(BranchArgs),

    /// Generate a PR title and description, push and open the PR
    Pr(PrArgs),

    /// Review staged changes
    Review,

    /// Explain a commit, a branch or the current changes
    Explain(ExplainArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Commit Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
pub struct CommitArgs {
    /// Stage all changes before generating
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Extra context for the generated message
    #[arg(short, long)]
    pub message: Option<String>,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Branch Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
pub struct BranchArgs {
    /// What the branch is for (defaults to the current changes)
    pub description: Option<String>,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// PR Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
pub struct PrArgs {
    /// Base branch for the PR (defaults to the repository default branch)
    #[arg(short, long)]
    pub base: Option<String>,

    /// Create as draft PR
    #[arg(long)]
    pub draft: bool,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Don't open the PR in a browser
    #[arg(long)]
    pub no_open: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Explain Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
pub struct ExplainArgs {
    /// Commit or branch to explain (defaults to the current changes)
    pub target: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// List all configuration values
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pr_flags() {
        let cli = Cli::parse_from(["aigit", "pr", "-b", "develop", "--draft", "-y", "--no-open"]);
        match cli.command {
            Commands::Pr(args) => {
                assert_eq!(args.base.as_deref(), Some("develop"));
                assert!(args.draft && args.yes && args.no_open);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_commit_flags() {
        let cli = Cli::parse_from(["aigit", "commit", "-a", "-m", "closes #12"]);
        match cli.command {
            Commands::Commit(args) => {
                assert!(args.all);
                assert!(!args.yes);
                assert_eq!(args.message.as_deref(), Some("closes #12"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_branch_description_is_positional() {
        let cli = Cli::parse_from(["aigit", "branch", "add user login", "--yes"]);
        match cli.command {
            Commands::Branch(args) => {
                assert_eq!(args.description.as_deref(), Some("add user login"));
                assert!(args.yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
