//! Explain CLI command handler

use tracing::debug;

use crate::ai::{ArtifactGenerator, DiffContext, GenerationClient};
use crate::cli::commands::ExplainArgs;
use crate::cli::interact;
use crate::core::config::Config;
use crate::core::git::GitRepository;
use crate::error::{AigitError, Result};

/// Handle the explain command
pub async fn handle_explain(args: ExplainArgs) -> Result<()> {
    let config = Config::load()?;
    let git = GitRepository::open_current_dir()?;

    let ctx = match args.target {
        Some(target) => target_context(&git, &target)?,
        None => working_tree_context(&git)?,
    };

    if ctx.diff.trim().is_empty() {
        return Err(AigitError::NoChanges("No changes found.".to_string()));
    }

    let client = GenerationClient::from_config(&config)?;
    if let Some(label) = &ctx.hint {
        println!("Explaining {} with {}...", label, client.model_name());
    }

    let explanation = ArtifactGenerator::new(client).explanation(&ctx).await?;

    interact::print_block("Explanation", &explanation);
    Ok(())
}

/// A commit, or failing that the three-dot diff against a branch
fn target_context(git: &GitRepository, target: &str) -> Result<DiffContext> {
    if git.is_commit(target) {
        let diff = git.commit_diff(target)?;
        return Ok(DiffContext::from_diff(diff).with_hint(Some(format!("Commit: {}", target))));
    }

    debug!("{} is not a local commit, trying as a branch", target);
    let current = git.current_branch()?;
    let diff = git
        .branch_diff(target)
        .map_err(|_| AigitError::RevisionNotFound(target.to_string()))?;
    Ok(DiffContext::from_diff(diff).with_hint(Some(format!("Branch diff: {}...{}", target, current))))
}

/// Staged changes, else unstaged changes
fn working_tree_context(git: &GitRepository) -> Result<DiffContext> {
    let (diff, label) = if git.has_staged_changes()? {
        (git.staged_diff()?, "Staged changes")
    } else if git.has_unstaged_changes()? {
        (git.unstaged_diff()?, "Unstaged changes")
    } else {
        return Err(AigitError::NoChanges(
            "No changes to explain.\n\n  → Specify a commit hash or branch, or make some changes first."
                .to_string(),
        ));
    };

    Ok(DiffContext::from_diff(diff).with_hint(Some(label.to_string())))
}
