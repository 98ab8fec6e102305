//! Terminal interaction helpers shared by the command flows

use dialoguer::{Confirm, Editor, Input, Select};

use crate::core::config::Config;
use crate::error::{AigitError, Result};

const RULE: &str = "─────────────────────────────────────";

/// What the user wants to do with a generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Edit,
    Cancel,
}

impl Decision {
    fn from_index(index: usize) -> Self {
        match index {
            0 => Decision::Accept,
            1 => Decision::Edit,
            _ => Decision::Cancel,
        }
    }
}

/// Whether the command should ask before acting
pub fn is_interactive(config: &Config, yes: bool) -> bool {
    config.interactive && !yes
}

/// Print a generated artifact between rules
pub fn print_block(title: &str, body: &str) {
    println!("\n{}:", title);
    println!("{}", RULE);
    println!("{}", body);
    println!("{}", RULE);
}

/// Ask whether to accept, edit or cancel
pub fn choose(prompt: &str, accept_label: &str) -> Result<Decision> {
    let index = Select::new()
        .with_prompt(prompt)
        .items(&[accept_label, "Edit", "Cancel"])
        .default(0)
        .interact()?;
    Ok(Decision::from_index(index))
}

/// Ask a yes/no question
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Edit multi-line text in `$EDITOR`
///
/// Closing the editor without saving keeps the original text.
pub fn edit_text(text: &str) -> Result<String> {
    let edited = Editor::new().edit(text)?;
    Ok(edited.map(|t| t.trim().to_string()).unwrap_or_else(|| text.to_string()))
}

/// Edit a single line, prefilled with the current value
pub fn edit_line(prompt: &str, current: &str) -> Result<String> {
    let line: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .interact_text()?;
    non_empty(prompt, line)
}

/// Ask for a value that has no default
pub fn ask_line(prompt: &str) -> Result<String> {
    let line: String = Input::new().with_prompt(prompt).interact_text()?;
    non_empty(prompt, line)
}

fn non_empty(prompt: &str, line: String) -> Result<String> {
    let line = line.trim();
    if line.is_empty() {
        return Err(AigitError::InvalidInput(format!("{} cannot be empty", prompt)));
    }
    Ok(line.to_string())
}
