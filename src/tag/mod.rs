//! tag
//!
//! Deterministic image tags from the state of a git working copy.
//!
//! # Output
//!
//! The result is always `<image>:<tag>` where `<tag>` is one of:
//! - a git tag's short name, when the tree is clean and a tag points at HEAD
//! - the 7-character short commit hash, when the tree is clean otherwise
//! - `<short>-dirty-<16 hex>`, when the tree has changes
//!
//! Two builds from the same clean commit get the same tag. A dirty tag
//! changes if and only if a changed path's contents or status change.
//!
//! # Errors
//!
//! Every failure is terminal and names the stage it happened in; see
//! [`TagError`].
//!
//! # Example
//!
//! ```no_run
//! use committag::core::types::ImageName;
//! use committag::tag::{compute_tag, TagOptions};
//! use std::path::Path;
//!
//! let options = TagOptions::new(ImageName::new("myapp").unwrap());
//! let tag = compute_tag(Path::new("."), options).unwrap();
//! println!("{}", tag);
//! ```

mod computer;
pub mod dirty;

pub use computer::TagComputer;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{ImageName, Oid};
use crate::git::GitError;

/// Errors from tag computation.
///
/// Each variant displays the stage that failed and carries the underlying
/// error as its source.
#[derive(Debug, Error)]
pub enum TagError {
    /// No repository at or above the working directory.
    #[error("opening git repo")]
    RepositoryNotFound { source: GitError },

    /// The repository has no working tree.
    #[error("reading worktree")]
    WorktreeRead { source: GitError },

    /// The worktree status could not be computed.
    #[error("reading status")]
    StatusRead { source: GitError },

    /// HEAD is unborn or does not resolve to a commit.
    #[error("determining current git commit")]
    HeadResolution { source: GitError },

    /// Tags could not be enumerated.
    #[error("determining git tag")]
    TagEnumeration { source: GitError },

    /// A changed file could not be opened or fully read.
    #[error("reading diff")]
    DiffRead { source: GitError },
}

impl TagError {
    /// Short label of the failing stage.
    pub fn stage(&self) -> &'static str {
        match self {
            TagError::RepositoryNotFound { .. } => "opening git repo",
            TagError::WorktreeRead { .. } => "reading worktree",
            TagError::StatusRead { .. } => "reading status",
            TagError::HeadResolution { .. } => "determining current git commit",
            TagError::TagEnumeration { .. } => "determining git tag",
            TagError::DiffRead { .. } => "reading diff",
        }
    }
}

/// How to choose among several tags pointing at HEAD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSelection {
    /// Byte-wise smallest tag name, independent of enumeration order.
    #[default]
    Lowest,
    /// Last match in enumeration order.
    Last,
}

/// Inputs to a tag computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOptions {
    /// Image name, used verbatim as the prefix
    pub image: ImageName,
    /// Tie-break when several tags point at HEAD
    pub selection: TagSelection,
}

impl TagOptions {
    /// Options with the default tag selection.
    pub fn new(image: ImageName) -> Self {
        Self {
            image,
            selection: TagSelection::default(),
        }
    }

    /// Override the tag selection policy.
    pub fn with_selection(mut self, selection: TagSelection) -> Self {
        self.selection = selection;
        self
    }
}

/// What the tag was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    /// Clean tree, short commit hash.
    Commit,
    /// Clean tree, git tag at HEAD.
    Tagged,
    /// Working tree has changes.
    Dirty,
}

/// A computed image reference.
///
/// `Display` renders `<image>:<tag>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualifiedTag {
    /// Image name the tag was computed for
    pub image: ImageName,
    /// Tag portion of the reference
    pub tag: String,
    /// HEAD at computation time
    pub head: Oid,
    /// What the tag was derived from
    pub kind: TagKind,
    /// Changed paths in hashing order, decoded lossily for display; empty
    /// unless dirty
    pub changed_paths: Vec<String>,
}

impl QualifiedTag {
    /// The full `<image>:<tag>` reference.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }

    /// Whether the tag carries a dirty suffix.
    pub fn is_dirty(&self) -> bool {
        self.kind == TagKind::Dirty
    }

    /// Check the tag against container reference tag syntax.
    ///
    /// Git tag names may contain characters (like `/`) that registries
    /// reject. The tag is never rewritten; callers decide what to do.
    pub fn has_valid_reference_tag(&self) -> bool {
        is_valid_reference_tag(&self.tag)
    }
}

impl std::fmt::Display for QualifiedTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.image, self.tag)
    }
}

/// Maximum length of a container reference tag.
pub const MAX_REFERENCE_TAG_LEN: usize = 128;

/// Whether `tag` matches `[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}`.
///
/// # Example
///
/// ```
/// use committag::tag::is_valid_reference_tag;
///
/// assert!(is_valid_reference_tag("v1.2.3"));
/// assert!(!is_valid_reference_tag("release/1.0"));
/// ```
pub fn is_valid_reference_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    let first_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphanumeric() || c == '_');

    first_ok
        && tag.len() <= MAX_REFERENCE_TAG_LEN
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Compute the tag for the repository containing `working_dir`.
///
/// Shorthand for `TagComputer::new(options).compute_at(working_dir)`.
pub fn compute_tag(working_dir: &Path, options: TagOptions) -> Result<QualifiedTag, TagError> {
    TagComputer::new(options).compute_at(working_dir)
}
