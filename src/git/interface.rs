//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to the repository. All
//! reads flow through [`Git`], which returns structured results and
//! normalizes errors into typed failure categories.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::BareRepo`]: Repository has no working directory
//! - [`GitError::UnbornHead`]: HEAD points at a branch with no commits
//! - [`GitError::Io`]: A working-tree file could not be opened or read
//!
//! # Example
//!
//! ```ignore
//! use committag::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let oid = git.head_oid()?;
//! println!("HEAD is at {}", oid.short(7));
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::traits::RepoReader;
use crate::core::types::{Oid, RepoPath, StatusCode, TagRef, TypeError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// HEAD points at a branch that has no commits yet.
    #[error("HEAD is unborn (no commits yet)")]
    UnbornHead,

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// A working-tree file could not be opened or read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Repository-relative path of the file
        path: RepoPath,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::UnbornBranch => GitError::UnbornHead,
            git2::ErrorCode::NotFound => GitError::RefNotFound {
                refname: context.to_string(),
            },
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: context.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            other => GitError::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Per-path status of the working tree.
///
/// Maps repository-relative paths to their [`StatusCode`]. Paths are the
/// raw bytes git reports, so two names that only differ in invalid UTF-8
/// stay distinct. The map has no meaningful iteration order; use
/// [`WorktreeStatus::changed`] when order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorktreeStatus {
    entries: HashMap<RepoPath, StatusCode>,
}

impl WorktreeStatus {
    /// Create an empty status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the status of a path, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<RepoPath>, code: StatusCode) {
        self.entries.insert(path.into(), code);
    }

    /// Look up the status of a path.
    pub fn get(&self, path: impl AsRef<[u8]>) -> Option<StatusCode> {
        self.entries.get(path.as_ref()).copied()
    }

    /// Number of entries, unmodified ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the status holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if no entry marks its path as changed.
    pub fn is_clean(&self) -> bool {
        !self.entries.values().any(|code| code.is_changed())
    }

    /// Changed paths with their codes, sorted byte-wise by path.
    ///
    /// # Example
    ///
    /// ```
    /// use committag::core::types::StatusCode;
    /// use committag::git::WorktreeStatus;
    ///
    /// let mut status = WorktreeStatus::new();
    /// status.insert("b.txt", StatusCode::Modified);
    /// status.insert("a.txt", StatusCode::Untracked);
    /// status.insert("c.txt", StatusCode::Unmodified);
    ///
    /// let changed = status.changed();
    /// assert_eq!(changed.len(), 2);
    /// assert_eq!(*changed[0].0, "a.txt");
    /// assert_eq!(changed[1], (&"b.txt".into(), StatusCode::Modified));
    /// ```
    pub fn changed(&self) -> Vec<(&RepoPath, StatusCode)> {
        let mut changed: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, code)| code.is_changed())
            .map(|(path, code)| (path, *code))
            .collect();
        changed.sort_by(|a, b| a.0.cmp(b.0));
        changed
    }
}

impl<P: Into<RepoPath>> FromIterator<(P, StatusCode)> for WorktreeStatus {
    fn from_iter<I: IntoIterator<Item = (P, StatusCode)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(path, code)| (path.into(), code))
                .collect(),
        }
    }
}

/// Collapse git2 status flags into a single code.
///
/// The worktree-vs-index change wins; when the worktree matches the index,
/// the index-vs-HEAD change is reported instead, so staged-only changes
/// still count.
pub(crate) fn status_code(status: git2::Status) -> StatusCode {
    if status.is_conflicted() {
        StatusCode::UpdatedButUnmerged
    } else if status.is_wt_new() {
        StatusCode::Untracked
    } else if status.is_wt_deleted() {
        StatusCode::Deleted
    } else if status.is_wt_renamed() {
        StatusCode::Renamed
    } else if status.is_wt_typechange() {
        StatusCode::TypeChanged
    } else if status.is_wt_modified() {
        StatusCode::Modified
    } else if status.is_index_new() {
        StatusCode::Added
    } else if status.is_index_deleted() {
        StatusCode::Deleted
    } else if status.is_index_renamed() {
        StatusCode::Renamed
    } else if status.is_index_typechange() {
        StatusCode::TypeChanged
    } else if status.is_index_modified() {
        StatusCode::Modified
    } else {
        StatusCode::Unmodified
    }
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. No other module
/// imports `git2` directly. All operations are read-only.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
    /// Working directory root
    work_dir: PathBuf,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|e| match e.code() {
            git2::ErrorCode::NotFound => GitError::NotARepo {
                path: path.to_path_buf(),
            },
            _ => GitError::from_git2(e, &path.display().to_string()),
        })?;

        let work_dir = match repo.workdir() {
            Some(dir) if !repo.is_bare() => dir.to_path_buf(),
            _ => return Err(GitError::BareRepo),
        };

        Ok(Self { repo, work_dir })
    }

    /// Get direct access to the .git directory path.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Get the working directory root.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    // =========================================================================
    // Working Tree Status
    // =========================================================================

    /// Get the per-path status of the working tree.
    ///
    /// Untracked files are included (untracked directories are expanded to
    /// their files); ignored files are not. Paths keep the exact bytes
    /// stored by git.
    pub fn worktree_status(&self) -> Result<WorktreeStatus, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .include_unmodified(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::from_git2(e, "status"))?;

        let mut result = WorktreeStatus::new();
        for entry in statuses.iter() {
            result.insert(entry.path_bytes(), status_code(entry.status()));
        }

        Ok(result)
    }

    // =========================================================================
    // Ref Resolution
    // =========================================================================

    /// Get HEAD commit OID.
    ///
    /// # Errors
    ///
    /// - [`GitError::UnbornHead`] if HEAD is unborn (new repository)
    pub fn head_oid(&self) -> Result<Oid, GitError> {
        let head = self
            .repo
            .head()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;

        let oid = head
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?
            .id();

        Oid::new(oid.to_string()).map_err(|e| e.into())
    }

    // =========================================================================
    // Tag Enumeration
    // =========================================================================

    /// List all tags with the commit each resolves to.
    ///
    /// Annotated tags are peeled to their commit. Tags with non-UTF8 names
    /// are skipped. Order is whatever the ref store yields.
    pub fn list_tags(&self) -> Result<Vec<TagRef>, GitError> {
        let refs = self
            .repo
            .references_glob("refs/tags/*")
            .map_err(|e| GitError::from_git2(e, "refs/tags"))?;

        let mut tags = Vec::new();
        for reference in refs {
            let reference = reference.map_err(|e| GitError::from_git2(e, "refs/tags"))?;

            let name = match reference.shorthand() {
                Some(n) => n.to_string(),
                None => continue,
            };

            let oid = match reference.peel_to_commit() {
                Ok(commit) => commit.id(),
                // Tags on trees or blobs can never match HEAD, keep the raw target
                Err(_) => match reference.target() {
                    Some(oid) => oid,
                    None => continue,
                },
            };

            tags.push(TagRef::new(name, Oid::new(oid.to_string())?));
        }

        Ok(tags)
    }

    // =========================================================================
    // Working Tree Files
    // =========================================================================

    /// Open a working-tree entry by its repository-relative path.
    ///
    /// A regular file yields its contents. A directory is a submodule
    /// checkout and yields the hex id of the submodule's HEAD commit, so a
    /// moved submodule is hashed by the commit it now points at.
    pub fn open_file(&self, path: &RepoPath) -> Result<Box<dyn Read + '_>, GitError> {
        let io_error = |source: io::Error| GitError::Io {
            path: path.clone(),
            source,
        };

        let relative = path
            .to_path()
            .map_err(|e| io_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        let full = self.work_dir.join(relative);

        if full.is_dir() {
            let head = Self::submodule_head(&full).map_err(io_error)?;
            return Ok(Box::new(Cursor::new(head.to_string().into_bytes())));
        }

        let file = File::open(&full).map_err(io_error)?;
        Ok(Box::new(file))
    }

    /// Resolve HEAD of the repository checked out at `dir`.
    fn submodule_head(dir: &Path) -> Result<Oid, io::Error> {
        let not_a_checkout = |e: git2::Error| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("directory is not a submodule checkout: {}", e.message()),
            )
        };

        let repo = git2::Repository::open(dir).map_err(not_a_checkout)?;
        let commit = repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(not_a_checkout)?;

        Oid::new(commit.id().to_string())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl RepoReader for Git {
    fn head(&self) -> Result<Oid, GitError> {
        self.head_oid()
    }

    fn status(&self) -> Result<WorktreeStatus, GitError> {
        self.worktree_status()
    }

    fn tags(&self) -> Result<Vec<TagRef>, GitError> {
        self.list_tags()
    }

    fn open_file(&self, path: &RepoPath) -> Result<Box<dyn Read + '_>, GitError> {
        Git::open_file(self, path)
    }
}
