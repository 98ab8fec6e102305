//! Branch CLI command handler

use crate::ai::interpret::normalize_branch_name;
use crate::ai::{ArtifactGenerator, DiffContext, GenerationClient};
use crate::cli::commands::BranchArgs;
use crate::cli::interact::{self, Decision};
use crate::core::config::Config;
use crate::core::git::GitRepository;
use crate::error::{AigitError, Result};

/// Handle the branch command
pub async fn handle_branch(args: BranchArgs) -> Result<()> {
    let config = Config::load()?;
    let git = GitRepository::open_current_dir()?;
    let interactive = interact::is_interactive(&config, args.yes);

    let description = args.description.filter(|d| !d.trim().is_empty());
    let ctx = match description {
        Some(description) => DiffContext::default().with_hint(Some(description)),
        None => changes_context(&git, interactive)?,
    };

    let client = GenerationClient::from_config(&config)?;
    println!("Generating branch name with {}...", client.model_name());

    let generator = ArtifactGenerator::new(client);
    let mut branch_name = generator.branch_name(&ctx).await?;

    interact::print_block("Generated branch name", &branch_name);

    if interactive {
        match interact::choose("Create this branch?", "Create")? {
            Decision::Accept => {}
            Decision::Edit => {
                branch_name =
                    normalize_branch_name(&interact::edit_line("Branch name", &branch_name)?)
            }
            Decision::Cancel => return Err(AigitError::Cancelled),
        }
    }

    git.create_branch(&branch_name, true)?;
    println!("✓ Created and switched to branch: {}", branch_name);

    Ok(())
}

/// Staged changes, else unstaged changes, else a description from the user
fn changes_context(git: &GitRepository, interactive: bool) -> Result<DiffContext> {
    let staged = git.staged_diff()?;
    if !staged.trim().is_empty() {
        return Ok(DiffContext::from_diff(staged));
    }

    let unstaged = git.unstaged_diff()?;
    if !unstaged.trim().is_empty() {
        return Ok(DiffContext::from_diff(unstaged));
    }

    if !interactive {
        return Err(AigitError::NoChanges(
            "No changes found to name a branch after.\n\n  → Pass a description: aigit branch \"add user login\""
                .to_string(),
        ));
    }

    println!("No changes found. Please provide a description.");
    let description = interact::ask_line("Branch description")?;
    Ok(DiffContext::default().with_hint(Some(description)))
}
