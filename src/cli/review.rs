//! Review CLI command handler

use crate::ai::{ArtifactGenerator, DiffContext, GenerationClient};
use crate::cli::interact;
use crate::core::config::Config;
use crate::core::git::GitRepository;
use crate::error::{AigitError, Result};

/// Handle the review command
pub async fn handle_review() -> Result<()> {
    let config = Config::load()?;
    let git = GitRepository::open_current_dir()?;

    let diff = git.staged_diff()?;
    if diff.trim().is_empty() {
        return Err(AigitError::NoChanges(
            "No staged changes to review.\n\n  → Use 'git add' to stage changes first.".to_string(),
        ));
    }

    let client = GenerationClient::from_config(&config)?;
    println!("Reviewing staged changes with {}...", client.model_name());

    let review = ArtifactGenerator::new(client)
        .review(&DiffContext::from_diff(diff))
        .await?;

    interact::print_block("Code Review", &review);
    Ok(())
}
