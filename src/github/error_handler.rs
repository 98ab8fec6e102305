//! GitHub API error detection and classification
//!
//! Parses octocrab errors to provide actionable user guidance.

use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Command;

use crate::error::AigitError;

/// Extracts the `owner:branch` head from a duplicate-PR validation error
static EXISTING_PR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"A pull request already exists for ([^\s"]+)"#)
        .expect("Invalid regex pattern for existing PR detection")
});

/// Extracts the field-level messages GitHub attaches to a 422 response
static VALIDATION_MESSAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"message"?: (?:String\()?"([^"]+)""#)
        .expect("Invalid regex pattern for validation messages")
});

/// Classifies an octocrab error into an actionable AigitError
pub fn classify_github_error(err: octocrab::Error) -> AigitError {
    // Display only returns "GitHub", the Debug output carries the response
    let error_message = format!("{:?}", err);
    classify_message(&error_message)
}

fn classify_message(error_message: &str) -> AigitError {
    if let Some(head) = extract_existing_pr_head(error_message) {
        return AigitError::GitHubApi(format!(
            "A pull request already exists for {}.\n\n  → Push new commits to update it instead.",
            head
        ));
    }

    if is_rate_limit_error(error_message) {
        return AigitError::GitHubApi(
            "API rate limit exceeded. Please wait a few minutes and try again.".to_string(),
        );
    }

    if is_not_found_error(error_message) {
        return AigitError::GitHubApi(
            "Repository not found. It may be private or your token may not have access."
                .to_string(),
        );
    }

    if is_validation_error(error_message) {
        let details = extract_validation_messages(error_message);
        return AigitError::GitHubApi(if details.is_empty() {
            "GitHub rejected the pull request (validation failed). Check that the branch was pushed and differs from the base.".to_string()
        } else {
            format!("GitHub rejected the pull request: {}", details.join("; "))
        });
    }

    AigitError::GitHubApi(error_message.to_string())
}

fn extract_existing_pr_head(error_message: &str) -> Option<String> {
    // Quick check before running regex
    if !error_message.contains("already exists") {
        return None;
    }

    EXISTING_PR_PATTERN
        .captures(error_message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('.').to_string())
}

fn extract_validation_messages(error_message: &str) -> Vec<String> {
    VALIDATION_MESSAGE_PATTERN
        .captures_iter(error_message)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|m| m != "Validation Failed")
        .collect()
}

/// Check if error is a rate limit error
fn is_rate_limit_error(error_message: &str) -> bool {
    error_message.contains("rate limit")
        || (error_message.contains("403") && error_message.contains("limit exceeded"))
}

/// Check if error is a 404 not found
fn is_not_found_error(error_message: &str) -> bool {
    error_message.contains("404") || error_message.contains("Not Found")
}

fn is_validation_error(error_message: &str) -> bool {
    error_message.contains("422") || error_message.contains("Validation Failed")
}

/// Attempt to open a URL in the default browser
///
/// Returns true if the browser was successfully launched, false otherwise.
#[allow(unused_variables)]
pub fn open_browser(url: &str) -> bool {
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(url).spawn().is_ok()
    }
    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(url).spawn().is_ok()
    }
    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .is_ok()
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        false
    }
}
