//! git::traits
//!
//! The read capability the tag computer needs from a repository.
//!
//! # Design
//!
//! `RepoReader` is deliberately narrow: four read operations and nothing
//! else. [`Git`](super::Git) implements it against a real repository and
//! [`MemoryRepo`](super::MemoryRepo) implements it in memory for tests.

use std::io::Read;

use super::interface::{GitError, WorktreeStatus};
use crate::core::types::{Oid, RepoPath, TagRef};

/// Read-only access to a repository's HEAD, status, tags and files.
pub trait RepoReader {
    /// Resolve HEAD to a commit id.
    ///
    /// Fails with [`GitError::UnbornHead`] when the current branch has no
    /// commits.
    fn head(&self) -> Result<Oid, GitError>;

    /// Per-path status of the working tree against the index and HEAD.
    fn status(&self) -> Result<WorktreeStatus, GitError>;

    /// All tags, in whatever order the underlying store yields them.
    fn tags(&self) -> Result<Vec<TagRef>, GitError>;

    /// Open a file as currently present in the working tree.
    ///
    /// `path` is repository-relative, as reported by [`RepoReader::status`].
    fn open_file(&self, path: &RepoPath) -> Result<Box<dyn Read + '_>, GitError>;
}
