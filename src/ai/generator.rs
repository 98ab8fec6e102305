//! Artifact generation pipeline
//!
//! Prompt builder, completion call and response interpretation for each kind
//! of artifact. Empty input is rejected here before anything is sent.

use tracing::debug;

use crate::ai::client::TextGenerator;
use crate::ai::interpret::{self, PrContent};
use crate::ai::prompts::{self, DiffContext, PromptRequest};
use crate::error::{AigitError, Result};

/// Generates commit messages, branch names, PR content, reviews and explanations
pub struct ArtifactGenerator<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> ArtifactGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Generate a commit message for a staged diff
    pub async fn commit_message(&self, ctx: &DiffContext, conventional: bool) -> Result<String> {
        require_diff(ctx, "No staged changes to describe.")?;
        let response = self.run(prompts::commit_prompt(ctx, conventional)).await?;
        Ok(interpret::clean_text(&response))
    }

    /// Generate a branch name from a description or a diff
    ///
    /// Either one is enough; the description wins when both are present.
    pub async fn branch_name(&self, ctx: &DiffContext) -> Result<String> {
        if ctx.is_empty() {
            return Err(AigitError::NoChanges(
                "Nothing to name a branch after.\n\n  → Pass a description: aigit branch \"add user login\""
                    .to_string(),
            ));
        }
        let response = self.run(prompts::branch_prompt(ctx)).await?;
        Ok(interpret::normalize_branch_name(&response))
    }

    /// Generate a PR title and description for a branch diff
    pub async fn pull_request(&self, ctx: &DiffContext) -> Result<PrContent> {
        if ctx.branches.is_none() {
            return Err(AigitError::InvalidInput(
                "PR generation needs a base and a current branch".to_string(),
            ));
        }
        require_diff(ctx, "No changes between the branches.")?;
        let response = self.run(prompts::pr_prompt(ctx)).await?;
        Ok(interpret::parse_pr_response(&response))
    }

    /// Generate a code review for a diff
    pub async fn review(&self, ctx: &DiffContext) -> Result<String> {
        require_diff(ctx, "No staged changes to review.")?;
        let response = self.run(prompts::review_prompt(ctx)).await?;
        Ok(interpret::clean_text(&response))
    }

    /// Generate a plain-language explanation of a diff
    pub async fn explanation(&self, ctx: &DiffContext) -> Result<String> {
        require_diff(ctx, "No changes to explain.")?;
        let response = self.run(prompts::explain_prompt(ctx)).await?;
        Ok(interpret::clean_text(&response))
    }

    async fn run(&self, prompt: PromptRequest) -> Result<String> {
        debug!(
            "Generating {} (max_tokens={}, prompt {} bytes)",
            prompt.kind,
            prompt.max_tokens,
            prompt.text.len()
        );
        self.generator.complete(&prompt).await
    }
}

fn require_diff(ctx: &DiffContext, message: &str) -> Result<()> {
    if ctx.diff.trim().is_empty() {
        return Err(AigitError::NoChanges(message.to_string()));
    }
    Ok(())
}
