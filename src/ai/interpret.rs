//! Post-processing of completion text into user-facing artifacts

/// Characters stripped from the ends of a generated branch name
const BRANCH_WRAPPERS: &[char] = &['`', '\'', '"'];

const TITLE_MARKER: &str = "TITLE:";
const DESCRIPTION_MARKER: &str = "DESCRIPTION:";

/// Generated PR content
///
/// Title and description are independent. The marker flags tell "the model
/// left the marker out" apart from "the marker was there with nothing after
/// it"; both leave the corresponding text empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrContent {
    /// PR title, empty if missing
    pub title: String,
    /// PR body/description, empty if missing
    pub description: String,
    /// Whether a `TITLE:` line was present
    pub has_title_marker: bool,
    /// Whether a `DESCRIPTION:` line was present
    pub has_description_marker: bool,
}

impl PrContent {
    /// Whether the title needs manual entry
    pub fn missing_title(&self) -> bool {
        self.title.is_empty()
    }
}

/// Trimmed pass-through for commit messages, reviews and explanations
pub fn clean_text(response: &str) -> String {
    response.trim().to_string()
}

/// Normalize a generated branch name
///
/// Lower-cases, turns spaces into hyphens and strips wrapping quotes and
/// backticks. The `type/description` shape is not enforced.
pub fn normalize_branch_name(response: &str) -> String {
    response
        .trim()
        .to_lowercase()
        .replace(char::is_whitespace, "-")
        .trim_matches(BRANCH_WRAPPERS)
        .replace(BRANCH_WRAPPERS, "")
}

/// Split a PR response into title and description
///
/// A line starting with `TITLE:` sets the title. A line starting with
/// `DESCRIPTION:` starts the description; every later line is kept verbatim,
/// markers included.
pub fn parse_pr_response(response: &str) -> PrContent {
    let mut content = PrContent::default();
    let mut description_lines: Vec<&str> = Vec::new();

    for line in response.lines() {
        if content.has_description_marker {
            description_lines.push(line);
        } else if let Some(title) = line.strip_prefix(TITLE_MARKER) {
            content.title = title.trim().to_string();
            content.has_title_marker = true;
        } else if line.starts_with(DESCRIPTION_MARKER) {
            content.has_description_marker = true;
        }
    }

    content.description = description_lines.join("\n").trim().to_string();
    content
}
