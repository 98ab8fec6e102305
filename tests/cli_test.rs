use std::fs;
use std::path::Path;

use assert_cmd::Command;
use git2::{Repository, RepositoryInitOptions, Signature};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `aigit` with an isolated config file and no ambient credentials
fn aigit(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aigit").unwrap();
    cmd.env("AIGIT_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("OPENAI_API_KEY")
        .env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn commit_file(repo: &Repository, name: &str, contents: &str) {
    let workdir = repo.workdir().unwrap();
    fs::write(workdir.join(name), contents).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let sig = Signature::now("Test", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<_> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, &format!("add {name}"), &tree, &parents)
        .unwrap();
}

#[test]
fn help_lists_subcommands() {
    let config = TempDir::new().unwrap();
    aigit(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("commit"))
        .stdout(predicate::str::contains("branch"))
        .stdout(predicate::str::contains("pr"))
        .stdout(predicate::str::contains("review"))
        .stdout(predicate::str::contains("explain"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn config_set_then_get_masks_secrets() {
    let config = TempDir::new().unwrap();

    aigit(&config)
        .args(["config", "set", "openai_api_key", "sk-1234567890abcdef"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-1...cdef"))
        .stdout(predicate::str::contains("1234567890").not());

    aigit(&config)
        .args(["config", "get", "openai_api_key"])
        .assert()
        .success()
        .stdout(predicate::str::contains("openai_api_key = sk-1...cdef"));

    let stored = fs::read_to_string(config.path().join("config.toml")).unwrap();
    assert!(stored.contains("sk-1234567890abcdef"));
}

#[test]
fn config_list_shows_defaults_and_path() {
    let config = TempDir::new().unwrap();
    aigit(&config)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gpt-4o-mini"))
        .stdout(predicate::str::contains("conventional_commits"))
        .stdout(predicate::str::contains("Config file:"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_bool_and_unknown_keys() {
    let config = TempDir::new().unwrap();

    aigit(&config)
        .args(["config", "set", "auto_stage", "YES"])
        .assert()
        .success();
    aigit(&config)
        .args(["config", "get", "auto_stage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auto_stage = true"));

    aigit(&config)
        .args(["config", "set", "team", "platform"])
        .assert()
        .success();
    aigit(&config)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("team"))
        .stdout(predicate::str::contains("platform"));
}

#[test]
fn config_rejects_unknown_provider() {
    let config = TempDir::new().unwrap();
    aigit(&config)
        .args(["config", "set", "provider", "skynet"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid provider 'skynet'"));
}

#[test]
fn config_get_missing_key() {
    let config = TempDir::new().unwrap();
    aigit(&config)
        .args(["config", "get", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Key not found: nope"));
}

#[test]
fn commit_outside_repository_fails() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    aigit(&config)
        .current_dir(dir.path())
        .arg("commit")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn commit_with_clean_tree_reports_no_changes() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    commit_file(&repo, "README.md", "hello\n");

    aigit(&config)
        .current_dir(dir.path())
        .args(["commit", "-a", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No staged changes to commit."));
}

#[test]
fn review_without_staged_changes_fails_before_generation() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    commit_file(&repo, "README.md", "hello\n");
    fs::write(dir.path().join("README.md"), "changed\n").unwrap();

    aigit(&config)
        .current_dir(dir.path())
        .arg("review")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No staged changes to review."));
}

#[test]
fn branch_without_changes_or_description_fails_when_not_interactive() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    commit_file(&repo, "README.md", "hello\n");

    aigit(&config)
        .current_dir(dir.path())
        .args(["branch", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes found"));
}

#[test]
fn explain_unknown_target() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    commit_file(&repo, "README.md", "hello\n");

    aigit(&config)
        .current_dir(dir.path())
        .args(["explain", "no-such-ref"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find commit or branch: no-such-ref"));
}

#[test]
fn pr_on_base_branch_is_refused() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    commit_file(&repo, "README.md", "hello\n");
    let current = repo.head().unwrap().shorthand().unwrap().to_string();

    aigit(&config)
        .current_dir(dir.path())
        .args(["pr", "--base", &current, "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("You're on the base branch"));
}

#[test]
fn pr_without_remote_fails_before_generation() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    commit_file(&repo, "README.md", "hello\n");
    let base = repo.head().unwrap().shorthand().unwrap().to_string();

    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch("feature/login", &head, false).unwrap();
    repo.set_head("refs/heads/feature/login").unwrap();
    commit_file(&repo, "login.rs", "fn login() {}\n");

    aigit(&config)
        .current_dir(dir.path())
        .args(["pr", "--base", &base, "-y", "--no-open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No remote origin URL found"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Full flows against a local completion endpoint
// ─────────────────────────────────────────────────────────────────────────────

/// Repository on `main` with one commit and a committer identity
fn init_repo(dir: &TempDir) -> Repository {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(dir.path(), &opts).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    config.set_bool("commit.gpgsign", false).unwrap();

    commit_file(&repo, "README.md", "hello\n");
    repo
}

/// Completion endpoint answering every chat request with `reply`
async fn completion_server(reply: &str, expected_body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": reply }, "finish_reason": "stop" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

/// Local profile pointing at `server`, plus any extra TOML lines
fn write_profile(config_dir: &TempDir, server: &MockServer, extra: &str) {
    fs::write(
        config_dir.path().join("config.toml"),
        format!(
            "provider = \"ollama\"\nbase_url = \"{}/v1\"\nmodel = \"test-model\"\n{}",
            server.uri(),
            extra
        ),
    )
    .unwrap();
}

fn head_message(dir: &TempDir) -> String {
    let repo = Repository::open(dir.path()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    head.message().unwrap().to_string()
}

#[tokio::test(flavor = "multi_thread")]
async fn commit_yes_commits_generated_message() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    fs::write(dir.path().join("README.md"), "hello\nworld\n").unwrap();

    let server = completion_server("  docs: expand readme greeting \n", "+world").await;
    write_profile(&config, &server, "auto_stage = true\n");

    aigit(&config)
        .current_dir(dir.path())
        .args(["commit", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Staged all changes."))
        .stdout(predicate::str::contains("✓ Created commit:"))
        .stdout(predicate::str::contains("docs: expand readme greeting"));

    assert_eq!(head_message(&dir), "docs: expand readme greeting\n");
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn commit_surfaces_hook_rejection() {
    use std::os::unix::fs::PermissionsExt;

    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    fs::write(dir.path().join("README.md"), "hello\nworld\n").unwrap();

    let hook = dir.path().join(".git").join("hooks").join("pre-commit");
    fs::create_dir_all(hook.parent().unwrap()).unwrap();
    fs::write(&hook, "#!/bin/sh\necho 'lint failed' >&2\nexit 1\n").unwrap();
    fs::set_permissions(&hook, fs::Permissions::from_mode(0o755)).unwrap();

    let server = completion_server("feat: add world", "+world").await;
    write_profile(&config, &server, "");

    aigit(&config)
        .current_dir(dir.path())
        .args(["commit", "-a", "-y"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Commit failed: lint failed"));

    assert_eq!(head_message(&dir), "add README.md");
}

#[tokio::test(flavor = "multi_thread")]
async fn branch_from_description_checks_out_normalized_name() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    init_repo(&dir);

    let server = completion_server("`Feature/Add User Login`", "add user login").await;
    write_profile(&config, &server, "");

    aigit(&config)
        .current_dir(dir.path())
        .args(["branch", "add user login", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "✓ Created and switched to branch: feature/add-user-login",
        ));

    let repo = Repository::open(dir.path()).unwrap();
    assert_eq!(repo.head().unwrap().shorthand(), Some("feature/add-user-login"));
}

#[tokio::test(flavor = "multi_thread")]
async fn explain_commit_prints_reply() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let repo = init_repo(&dir);
    commit_file(&repo, "login.rs", "fn login() {}\n");
    let sha = repo.head().unwrap().target().unwrap().to_string();

    let server = completion_server("## Summary\nAdds a login function.\n", "+fn login() {}").await;
    write_profile(&config, &server, "");

    aigit(&config)
        .current_dir(dir.path())
        .args(["explain", &sha])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Explaining Commit: {sha}")))
        .stdout(predicate::str::contains("Adds a login function."));
}

#[tokio::test(flavor = "multi_thread")]
async fn explain_falls_back_to_remote_branch() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let repo = init_repo(&dir);
    let root = repo.head().unwrap().target().unwrap();
    repo.reference("refs/remotes/origin/release", root, true, "test")
        .unwrap();
    commit_file(&repo, "login.rs", "fn login() {}\n");

    let server = completion_server("## Summary\nBranch adds login.", "login.rs").await;
    write_profile(&config, &server, "");

    aigit(&config)
        .current_dir(dir.path())
        .args(["explain", "release"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Explaining Branch diff: release...main"))
        .stdout(predicate::str::contains("Branch adds login."));
}

#[tokio::test(flavor = "multi_thread")]
async fn explain_without_target_uses_staged_changes() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let repo = init_repo(&dir);
    fs::write(dir.path().join("README.md"), "hello\nstaged\n").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("README.md")).unwrap();
    index.write().unwrap();

    let server = completion_server("## Summary\nStaged tweak.", "+staged").await;
    write_profile(&config, &server, "");

    aigit(&config)
        .current_dir(dir.path())
        .arg("explain")
        .assert()
        .success()
        .stdout(predicate::str::contains("Explaining Staged changes"))
        .stdout(predicate::str::contains("Staged tweak."));
}
