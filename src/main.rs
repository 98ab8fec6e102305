//! aigit - AI-assisted git workflows
//!
//! Generates commit messages, branch names, pull requests, code reviews and
//! diff explanations with any OpenAI-compatible endpoint.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aigit::cli::commands::{Cli, Commands};
use aigit::cli::{branch, commit, config, explain, pr, review};
use aigit::core::git::GitRepository;
use aigit::error::{AigitError, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => {}
        // Declining is a user choice, not a failure
        Err(AigitError::Cancelled) => println!("{}", AigitError::Cancelled),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Config commands don't require git repository
        Commands::Config(args) => config::handle_config(args.command),

        // All other commands require a git repository
        command => {
            ensure_git_repository()?;

            match command {
                Commands::Commit(args) => commit::handle_commit(args).await,
                Commands::Branch(args) => branch::handle_branch(args).await,
                Commands::Pr(args) => pr::handle_pr(args).await,
                Commands::Review => review::handle_review().await,
                Commands::Explain(args) => explain::handle_explain(args).await,
                Commands::Config(_) => unreachable!(),
            }
        }
    }
}

/// Ensure we're in a git repository
fn ensure_git_repository() -> Result<()> {
    GitRepository::open_current_dir().map(|_| ())
}
