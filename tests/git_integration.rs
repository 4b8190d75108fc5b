//! Integration tests for the Git interface.
//!
//! These tests use real git repositories created via tempfile to verify
//! that the Git interface works correctly with actual git operations.

use std::io::Read;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use committag::core::types::{RepoPath, StatusCode};
use committag::git::{Git, GitError, RepoReader};

/// Test fixture that creates a real git repository.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new test repository with an initial commit.
    fn new() -> Self {
        let repo = Self::empty();
        repo.commit_file("README.md", "# Test Repo\n", "Initial commit");
        repo
    }

    /// Create a repository with no commits.
    fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);
        run_git(dir.path(), &["config", "commit.gpgsign", "false"]);
        run_git(dir.path(), &["config", "tag.gpgsign", "false"]);

        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn git(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    fn write(&self, path: &str, content: &str) {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    fn commit_file(&self, path: &str, content: &str, message: &str) {
        self.write(path, content);
        run_git(self.path(), &["add", path]);
        run_git(self.path(), &["commit", "-m", message]);
    }

    /// Get HEAD OID using git directly.
    fn head_oid_raw(&self) -> String {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(self.path())
            .output()
            .expect("git rev-parse failed");
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }
}

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

// =============================================================================
// Repository Opening Tests
// =============================================================================

#[test]
fn open_valid_repository() {
    let repo = TestRepo::new();
    assert!(Git::open(repo.path()).is_ok());
}

#[test]
fn open_from_subdirectory() {
    let repo = TestRepo::new();
    let subdir = repo.path().join("subdir/deeper");
    std::fs::create_dir_all(&subdir).unwrap();

    let git = Git::open(&subdir).unwrap();
    assert_eq!(
        git.work_dir().canonicalize().unwrap(),
        repo.path().canonicalize().unwrap()
    );
}

#[test]
fn open_non_repository_fails() {
    let dir = TempDir::new().unwrap();
    let git = Git::open(dir.path());
    assert!(matches!(git, Err(GitError::NotARepo { .. })));
}

#[test]
fn open_bare_repository_fails() {
    let dir = TempDir::new().unwrap();
    run_git(dir.path(), &["init", "--bare"]);

    let git = Git::open(dir.path());
    assert!(matches!(git, Err(GitError::BareRepo)));
}

#[test]
fn git_dir_is_dot_git() {
    let repo = TestRepo::new();
    assert!(repo.git().git_dir().ends_with(".git"));
}

// =============================================================================
// HEAD Tests
// =============================================================================

#[test]
fn head_matches_rev_parse() {
    let repo = TestRepo::new();
    let head = repo.git().head().unwrap();
    assert_eq!(head.as_str(), repo.head_oid_raw());
}

#[test]
fn unborn_head() {
    let repo = TestRepo::empty();
    assert!(matches!(repo.git().head(), Err(GitError::UnbornHead)));
}

// =============================================================================
// Status Tests
// =============================================================================

#[test]
fn fresh_commit_is_clean() {
    let repo = TestRepo::new();
    assert!(repo.git().status().unwrap().is_clean());
}

#[test]
fn status_codes_for_common_changes() {
    let repo = TestRepo::new();
    repo.commit_file("tracked.txt", "one\n", "Add tracked");
    repo.commit_file("doomed.txt", "bye\n", "Add doomed");

    repo.write("tracked.txt", "two\n");
    std::fs::remove_file(repo.path().join("doomed.txt")).unwrap();
    repo.write("fresh.txt", "new\n");
    repo.write("staged.txt", "staged\n");
    run_git(repo.path(), &["add", "staged.txt"]);

    let status = repo.git().status().unwrap();
    assert_eq!(status.get("tracked.txt"), Some(StatusCode::Modified));
    assert_eq!(status.get("doomed.txt"), Some(StatusCode::Deleted));
    assert_eq!(status.get("fresh.txt"), Some(StatusCode::Untracked));
    assert_eq!(status.get("staged.txt"), Some(StatusCode::Added));
    assert_eq!(status.get("README.md"), None);
}

#[test]
fn untracked_directories_are_expanded() {
    let repo = TestRepo::new();
    repo.write("newdir/a.txt", "a");
    repo.write("newdir/nested/b.txt", "b");

    let status = repo.git().status().unwrap();
    let paths: Vec<_> = status.changed().into_iter().map(|(p, _)| p).collect();
    assert_eq!(paths, vec!["newdir/a.txt", "newdir/nested/b.txt"]);
}

#[test]
fn ignored_files_are_excluded() {
    let repo = TestRepo::new();
    repo.commit_file(".gitignore", "*.log\n", "Ignore logs");
    repo.write("build.log", "noise");

    assert!(repo.git().status().unwrap().is_clean());
}

// =============================================================================
// Tag Tests
// =============================================================================

#[test]
fn lightweight_and_annotated_tags_resolve_to_commit() {
    let repo = TestRepo::new();
    run_git(repo.path(), &["tag", "v1.0.0"]);
    run_git(repo.path(), &["tag", "-a", "v1.0.1", "-m", "annotated"]);
    let head = repo.git().head().unwrap();

    let mut tags = repo.git().tags().unwrap();
    tags.sort_by(|a, b| a.name.cmp(&b.name));

    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].name, "v1.0.0");
    assert_eq!(tags[1].name, "v1.0.1");
    assert!(tags.iter().all(|t| t.target == head));
}

#[test]
fn tag_names_are_short() {
    let repo = TestRepo::new();
    run_git(repo.path(), &["tag", "release/2024"]);

    let tags = repo.git().tags().unwrap();
    assert_eq!(tags[0].name, "release/2024");
}

#[test]
fn no_tags() {
    let repo = TestRepo::new();
    assert!(repo.git().tags().unwrap().is_empty());
}

// =============================================================================
// File Access Tests
// =============================================================================

#[test]
fn open_file_reads_working_tree_content() {
    let repo = TestRepo::new();
    repo.write("README.md", "edited\n");

    let git = repo.git();
    let mut contents = String::new();
    RepoReader::open_file(&git, &"README.md".into())
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();

    assert_eq!(contents, "edited\n");
}

#[test]
fn open_missing_file_is_io_error() {
    let repo = TestRepo::new();
    let result = repo.git().open_file(&"nope.txt".into()).map(|_| ());

    match result {
        Err(GitError::Io { path, .. }) => assert_eq!(path, "nope.txt"),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn open_file_on_submodule_yields_its_head() {
    let upstream = TestRepo::new();
    let repo = TestRepo::new();
    run_git(
        repo.path(),
        &[
            "-c",
            "protocol.file.allow=always",
            "submodule",
            "add",
            upstream.path().to_str().unwrap(),
            "sub",
        ],
    );

    let git = repo.git();
    let mut contents = String::new();
    git.open_file(&"sub".into())
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();

    assert_eq!(contents, upstream.head_oid_raw());
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_untracked_name_keeps_raw_bytes() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let repo = TestRepo::new();
    let raw: &[u8] = b"caf\xe9.txt";
    std::fs::write(repo.path().join(OsStr::from_bytes(raw)), "bonjour\n").unwrap();

    let git = repo.git();
    let status = git.status().unwrap();
    assert_eq!(status.get(raw), Some(StatusCode::Untracked));
    assert_eq!(status.get("caf\u{FFFD}.txt"), None);

    let mut contents = String::new();
    RepoReader::open_file(&git, &RepoPath::from(raw))
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "bonjour\n");
}
