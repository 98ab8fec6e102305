//! Prompt templates for AI generation
//!
//! Every artifact kind has one deterministic template. The builders are pure:
//! the same [`DiffContext`] always renders the same [`PromptRequest`].

/// Kind of artifact a prompt asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Commit,
    Branch,
    PullRequest,
    Review,
    Explain,
}

impl TemplateKind {
    /// Output token budget for this kind
    pub fn max_tokens(&self) -> u32 {
        match self {
            TemplateKind::Commit => 256,
            TemplateKind::Branch => 64,
            TemplateKind::PullRequest | TemplateKind::Review | TemplateKind::Explain => 1024,
        }
    }

    /// Short identifier used in logs
    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Commit => "commit",
            TemplateKind::Branch => "branch",
            TemplateKind::PullRequest => "pr",
            TemplateKind::Review => "review",
            TemplateKind::Explain => "explain",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A rendered prompt ready for the endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    /// Template the prompt was rendered from
    pub kind: TemplateKind,
    /// Prompt text
    pub text: String,
    /// Output token budget
    pub max_tokens: u32,
}

impl PromptRequest {
    fn new(kind: TemplateKind, text: String) -> Self {
        Self {
            kind,
            text,
            max_tokens: kind.max_tokens(),
        }
    }
}

/// Base and current branch of a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPair {
    pub base: String,
    pub current: String,
}

/// The change under discussion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffContext {
    /// Unified diff text, possibly empty
    pub diff: String,
    /// Extra human context: the commit hint, the branch description, or
    /// the explain target label
    pub hint: Option<String>,
    /// Base/current branches (pull requests)
    pub branches: Option<BranchPair>,
    /// Files changed on the branch (pull requests)
    pub files: Vec<String>,
}

impl DiffContext {
    /// Context holding only a diff
    pub fn from_diff(diff: impl Into<String>) -> Self {
        Self {
            diff: diff.into(),
            ..Self::default()
        }
    }

    /// Attach a hint, ignoring blank ones
    pub fn with_hint(mut self, hint: Option<String>) -> Self {
        self.hint = hint.filter(|h| !h.trim().is_empty());
        self
    }

    /// Attach the pull request branches
    pub fn with_branches(mut self, base: impl Into<String>, current: impl Into<String>) -> Self {
        self.branches = Some(BranchPair {
            base: base.into(),
            current: current.into(),
        });
        self
    }

    /// Attach the changed file list
    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    /// Whether there is nothing at all to generate from
    pub fn is_empty(&self) -> bool {
        self.diff.trim().is_empty() && self.hint.is_none()
    }
}

const CONVENTIONAL_COMMITS_INSTRUCTION: &str = "Use Conventional Commits format:
- feat: new feature
- fix: bug fix
- docs: documentation
- style: formatting, no code change
- refactor: code restructuring
- test: adding tests
- chore: maintenance";

/// Generate the prompt for commit message generation
pub fn commit_prompt(ctx: &DiffContext, conventional: bool) -> PromptRequest {
    let conventional_instruction = if conventional {
        CONVENTIONAL_COMMITS_INSTRUCTION
    } else {
        ""
    };
    let hint_instruction = ctx
        .hint
        .as_deref()
        .map(|hint| format!("Additional context from user: {hint}"))
        .unwrap_or_default();
    let diff = &ctx.diff;

    let text = format!(
        r#"You are an expert at writing clear, concise git commit messages.

Analyze the following git diff and generate a commit message.

{conventional_instruction}

Rules:
- First line: Brief summary (50 chars max, imperative mood)
- If needed, add blank line then detailed body
- Focus on WHAT changed and WHY, not HOW
- Be specific, avoid vague words like "update", "fix", "change"

Git diff:
```
{diff}
```

{hint_instruction}

Respond with ONLY the commit message, no explanations or markdown."#
    );

    PromptRequest::new(TemplateKind::Commit, text)
}

/// Generate the prompt for branch name generation
///
/// An explicit description wins over the diff; with neither, a generic
/// request is made.
pub fn branch_prompt(ctx: &DiffContext) -> PromptRequest {
    let context = match (&ctx.hint, ctx.diff.trim().is_empty()) {
        (Some(description), _) => {
            format!("Create a branch name for this task:\n{description}")
        }
        (None, false) => format!(
            "Create a branch name based on these changes:\n```\n{}\n```",
            ctx.diff
        ),
        (None, true) => "Create a branch name for a new feature.".to_string(),
    };

    let text = format!(
        r#"You are an expert at creating clear, descriptive git branch names.

{context}

Rules:
- Use format: type/short-description
- Types: feature, fix, docs, refactor, test, chore
- Use lowercase with hyphens (kebab-case)
- Keep it short but descriptive (max 50 chars total)
- No special characters except hyphens and slashes

Respond with ONLY the branch name, no explanations."#
    );

    PromptRequest::new(TemplateKind::Branch, text)
}

/// Generate the prompt for PR title/description generation
///
/// The `TITLE:` / `DESCRIPTION:` format is what
/// [`crate::ai::interpret::parse_pr_response`] expects back.
pub fn pr_prompt(ctx: &DiffContext) -> PromptRequest {
    let (base_branch, current_branch) = ctx
        .branches
        .as_ref()
        .map(|b| (b.base.as_str(), b.current.as_str()))
        .unwrap_or_default();
    let files_changed = ctx.files.join(", ");
    let diff = &ctx.diff;

    let text = format!(
        r#"You are an expert at writing clear, comprehensive pull request descriptions.

Analyze the following git diff and generate a PR title and description.

Base branch: {base_branch}
Current branch: {current_branch}

Git diff:
```
{diff}
```

Files changed: {files_changed}

Generate a PR with:
1. A clear, concise title (max 72 chars)
2. A detailed description including:
   - Summary of changes
   - Key modifications
   - Any breaking changes or important notes

Respond in this exact format:
TITLE: <title here>
DESCRIPTION:
<description here>"#
    );

    PromptRequest::new(TemplateKind::PullRequest, text)
}

/// Generate the prompt for a code review
pub fn review_prompt(ctx: &DiffContext) -> PromptRequest {
    let diff = &ctx.diff;

    let text = format!(
        r#"You are an expert code reviewer. Review the following git diff for:

1. **Bugs**: Logic errors, edge cases, potential runtime errors
2. **Security**: Vulnerabilities, unsafe practices, exposed secrets
3. **Style**: Code quality, readability, maintainability
4. **Performance**: Inefficiencies, potential bottlenecks

Git diff:
```
{diff}
```

For each issue found, provide:
- Severity: CRITICAL / WARNING / INFO
- Location: File and approximate line
- Issue: Clear description
- Suggestion: How to fix it

If the code looks good, say so briefly.

Be concise and actionable. Focus on the most important issues."#
    );

    PromptRequest::new(TemplateKind::Review, text)
}

/// Generate the prompt for explaining a diff
pub fn explain_prompt(ctx: &DiffContext) -> PromptRequest {
    let context = ctx
        .hint
        .as_deref()
        .map(|label| format!("Context: {label}"))
        .unwrap_or_default();
    let diff = &ctx.diff;

    let text = format!(
        r#"You are an expert at explaining code changes in plain English.

Analyze the following git diff and provide a brief, structured explanation.

{context}

Git diff:
```
{diff}
```

Provide your response in this EXACT format:

## Summary
[2-3 sentence overview of what functionality was added/changed/fixed]

## Files Changed
- path/to/file1.ext - [brief description of major change]
- path/to/file2.ext - [brief description of major change]
[list all changed files with one line each]

## Key Changes
- [bullet point of important change 1]
- [bullet point of important change 2]
[max 3-4 key points]

Keep it SHORT and focused on WHAT was done, not HOW it was implemented."#
    );

    PromptRequest::new(TemplateKind::Explain, text)
}
