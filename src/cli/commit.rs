//! Commit CLI command handler

use crate::ai::{ArtifactGenerator, DiffContext, GenerationClient};
use crate::cli::commands::CommitArgs;
use crate::cli::interact::{self, Decision};
use crate::core::config::Config;
use crate::core::git::GitRepository;
use crate::error::{AigitError, Result};

/// Handle the commit command
pub async fn handle_commit(args: CommitArgs) -> Result<()> {
    let config = Config::load()?;
    let git = GitRepository::open_current_dir()?;

    // Stage all if requested
    if args.all || config.auto_stage {
        git.stage_all()?;
        println!("Staged all changes.");
    }

    let diff = git.staged_diff()?;
    if diff.trim().is_empty() {
        let hint = if git.has_unstaged_changes()? {
            "\n\n  → Stage files with 'git add', or run 'aigit commit -a' to stage everything."
        } else {
            "\n\n  → Working tree is clean."
        };
        return Err(AigitError::NoChanges(format!(
            "No staged changes to commit.{}",
            hint
        )));
    }

    // Show what will be committed
    println!("Changes to be committed:");
    for file in git.staged_files()? {
        println!("  {}", file);
    }
    println!();

    let client = GenerationClient::from_config(&config)?;
    println!("Generating commit message with {}...", client.model_name());

    let generator = ArtifactGenerator::new(client);
    let ctx = DiffContext::from_diff(diff).with_hint(args.message);
    let mut message = generator
        .commit_message(&ctx, config.conventional_commits)
        .await?;

    interact::print_block("Generated message", &message);

    if interact::is_interactive(&config, args.yes) {
        match interact::choose("Use this message?", "Commit")? {
            Decision::Accept => {}
            Decision::Edit => message = interact::edit_text(&message)?,
            Decision::Cancel => return Err(AigitError::Cancelled),
        }
    }

    let commit_hash = git.commit(&message)?;
    println!("✓ Created commit: {}", commit_hash);
    println!("  {}", message.lines().next().unwrap_or(""));

    Ok(())
}
