//! Pull request CLI command handler

use tracing::debug;

use crate::ai::{ArtifactGenerator, DiffContext, GenerationClient, PrContent};
use crate::cli::commands::PrArgs;
use crate::cli::interact;
use crate::core::config::Config;
use crate::core::credentials::CredentialStore;
use crate::core::git::GitRepository;
use crate::core::repository::RemoteRepository;
use crate::error::{AigitError, Result};
use crate::github::pull_request::{CreatePrParams, PullRequestHandler};
use crate::github::{open_browser, GitHubClient};

/// Handle the pr command
pub async fn handle_pr(args: PrArgs) -> Result<()> {
    let config = Config::load()?;
    let git = GitRepository::open_current_dir()?;
    let interactive = interact::is_interactive(&config, args.yes);

    let current_branch = git.current_branch()?;
    let base_branch = args.base.unwrap_or_else(|| git.default_branch());

    if current_branch == base_branch {
        return Err(AigitError::InvalidInput(format!(
            "You're on the base branch ({}).\n\n  → Create a feature branch first, or pass --base.",
            base_branch
        )));
    }

    let diff = git.branch_diff(&base_branch)?;
    if diff.trim().is_empty() {
        return Err(AigitError::NoChanges(format!(
            "No changes between {} and {}.",
            current_branch, base_branch
        )));
    }

    // Fail on a missing remote or token before spending a generation call
    let remote = RemoteRepository::from_git(&git)?;
    let token = CredentialStore::require_github_token(&config)?;
    debug!("Using GitHub token {}", CredentialStore::mask_secret(&token));
    let github = GitHubClient::new(&remote, token)?;

    let files_changed = git.changed_files(&base_branch);
    let ctx = DiffContext::from_diff(diff)
        .with_branches(base_branch.as_str(), current_branch.as_str())
        .with_files(files_changed);

    let client = GenerationClient::from_config(&config)?;
    println!(
        "Generating PR title and description with {}...",
        client.model_name()
    );
    let mut content = ArtifactGenerator::new(client).pull_request(&ctx).await?;

    if content.missing_title() {
        if !interactive {
            return Err(AigitError::Generation(
                "The response contained no PR title (expected a 'TITLE:' line).".to_string(),
            ));
        }
        println!("No title was generated.");
        content.title = interact::ask_line("PR title")?;
    }

    show_content(&content, &base_branch, &current_branch);

    if interactive {
        if !interact::confirm("Create this PR?", true)? {
            return Err(AigitError::Cancelled);
        }
        if interact::confirm("Edit title or description?", false)? {
            content.title = interact::edit_line("PR title", &content.title)?;
            content.description = interact::edit_text(&content.description)?;
        }
    }

    println!("Pushing {} to origin...", current_branch);
    git.push(true)?;

    println!("Creating pull request on {}...", remote.full_name());
    let handler = PullRequestHandler::new(&github);
    let pr = handler
        .create(CreatePrParams {
            head: current_branch,
            base: base_branch,
            title: content.title,
            body: Some(content.description),
            draft: args.draft,
        })
        .await?;

    println!("\n✓ Pull request created successfully!");
    println!("  #{}: {}", pr.number, pr.title);
    println!("  URL: {}", pr.url);

    if !args.no_open {
        println!("Opening in browser...");
        if !open_browser(&pr.url) {
            debug!("Could not launch a browser for {}", pr.url);
        }
    }

    Ok(())
}

fn show_content(content: &PrContent, base: &str, head: &str) {
    interact::print_block("PR Title", &content.title);
    let description = if content.description.is_empty() {
        "(no description)"
    } else {
        content.description.as_str()
    };
    interact::print_block("PR Description", description);
    println!("Base: {} ← Head: {}\n", base, head);
}
