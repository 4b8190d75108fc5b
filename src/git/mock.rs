//! git::mock
//!
//! In-memory repository for deterministic testing.
//!
//! # Design
//!
//! `MemoryRepo` implements [`RepoReader`] without touching the disk. It
//! holds a HEAD, a status map, a tag list and file contents, records
//! every file it is asked to open, and can be configured to fail any
//! operation.
//!
//! # Example
//!
//! ```
//! use committag::core::types::{Oid, StatusCode};
//! use committag::git::{MemoryRepo, RepoReader};
//!
//! let head = Oid::new("abcdef1234567890abcdef1234567890abcdef12").unwrap();
//! let repo = MemoryRepo::new(head.clone())
//!     .with_tag("v1.0.0", head.clone())
//!     .with_file("src/main.rs", StatusCode::Modified, "fn main() {}");
//!
//! assert_eq!(repo.head().unwrap(), head);
//! assert!(!repo.status().unwrap().is_clean());
//! assert_eq!(repo.tags().unwrap().len(), 1);
//! ```

use std::collections::HashMap;
use std::io::{self, Read};
use std::sync::{Arc, Mutex};

use super::interface::{GitError, WorktreeStatus};
use super::traits::RepoReader;
use crate::core::types::{Oid, RepoPath, StatusCode, TagRef};

/// In-memory repository for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share the
/// recorded operations.
#[derive(Debug, Clone)]
pub struct MemoryRepo {
    head: Option<Oid>,
    status: WorktreeStatus,
    tags: Vec<TagRef>,
    files: HashMap<RepoPath, Vec<u8>>,
    fail_on: Option<FailOn>,
    opened: Arc<Mutex<Vec<RepoPath>>>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailOn {
    /// Fail `head`.
    Head,
    /// Fail `status`.
    Status,
    /// Fail `tags`.
    Tags,
    /// Fail `open_file` for the given path.
    OpenFile(RepoPath),
    /// Open the given path, then fail while reading it.
    ReadFile(RepoPath),
}

impl MemoryRepo {
    /// Create a repository whose HEAD is at `head`, with a clean tree.
    pub fn new(head: Oid) -> Self {
        Self {
            head: Some(head),
            ..Self::unborn()
        }
    }

    /// Create a repository with no commits.
    pub fn unborn() -> Self {
        Self {
            head: None,
            status: WorktreeStatus::new(),
            tags: Vec::new(),
            files: HashMap::new(),
            fail_on: None,
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a tag.
    pub fn with_tag(mut self, name: &str, target: Oid) -> Self {
        self.tags.push(TagRef::new(name, target));
        self
    }

    /// Add a working-tree file with the given status and contents.
    pub fn with_file(
        mut self,
        path: impl Into<RepoPath>,
        code: StatusCode,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        let path = path.into();
        self.status.insert(path.clone(), code);
        self.files.insert(path, contents.into());
        self
    }

    /// Add a status entry with no file behind it (e.g. a deleted path).
    pub fn with_status(mut self, path: impl Into<RepoPath>, code: StatusCode) -> Self {
        self.status.insert(path, code);
        self
    }

    /// Replace the whole status map.
    pub fn with_status_map(mut self, status: WorktreeStatus) -> Self {
        self.status = status;
        self
    }

    /// Configure the repository to fail on a specific operation.
    pub fn fail_on(mut self, fail_on: FailOn) -> Self {
        self.fail_on = Some(fail_on);
        self
    }

    /// Paths passed to `open_file`, in call order.
    pub fn opened_files(&self) -> Vec<RepoPath> {
        self.opened.lock().unwrap().clone()
    }

    fn injected(operation: &str) -> GitError {
        GitError::Internal {
            message: format!("injected failure: {}", operation),
        }
    }
}

impl RepoReader for MemoryRepo {
    fn head(&self) -> Result<Oid, GitError> {
        if self.fail_on == Some(FailOn::Head) {
            return Err(Self::injected("head"));
        }
        self.head.clone().ok_or(GitError::UnbornHead)
    }

    fn status(&self) -> Result<WorktreeStatus, GitError> {
        if self.fail_on == Some(FailOn::Status) {
            return Err(Self::injected("status"));
        }
        Ok(self.status.clone())
    }

    fn tags(&self) -> Result<Vec<TagRef>, GitError> {
        if self.fail_on == Some(FailOn::Tags) {
            return Err(Self::injected("tags"));
        }
        Ok(self.tags.clone())
    }

    fn open_file(&self, path: &RepoPath) -> Result<Box<dyn Read + '_>, GitError> {
        self.opened.lock().unwrap().push(path.clone());

        match &self.fail_on {
            Some(FailOn::OpenFile(p)) if p == path => {
                return Err(GitError::Io {
                    path: path.clone(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "injected failure"),
                });
            }
            Some(FailOn::ReadFile(p)) if p == path => {
                return Ok(Box::new(FailingReader));
            }
            _ => {}
        }

        match self.files.get(path) {
            Some(contents) => Ok(Box::new(contents.as_slice())),
            None => Err(GitError::Io {
                path: path.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            }),
        }
    }
}

/// Reader that fails on first use.
struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "injected read failure"))
    }
}
