//! tag::computer
//!
//! The tag computation itself.
//!
//! # Algorithm
//!
//! 1. Read the worktree status, then resolve HEAD.
//! 2. Clean tree: the tag is a git tag pointing at HEAD if there is one,
//!    else the 7-character short hash.
//! 3. Dirty tree: the tag is `<short>-dirty-<hash>`, where the hash folds
//!    every changed path, its status code and its current contents.

use std::path::Path;

use super::dirty::dirty_hash;
use super::{QualifiedTag, TagError, TagKind, TagOptions, TagSelection};
use crate::core::types::{Oid, TagRef};
use crate::git::{Git, GitError, RepoReader};

/// Computes image tags from repository state.
///
/// Holds no repository state between calls; every call reads a fresh
/// snapshot.
///
/// # Example
///
/// ```
/// use committag::core::types::{ImageName, Oid};
/// use committag::git::MemoryRepo;
/// use committag::tag::{TagComputer, TagOptions};
///
/// let head = Oid::new("abcdef1234567890abcdef1234567890abcdef12").unwrap();
/// let repo = MemoryRepo::new(head.clone()).with_tag("release-1", head);
///
/// let computer = TagComputer::new(TagOptions::new(ImageName::new("myapp").unwrap()));
/// let tag = computer.compute(&repo).unwrap();
/// assert_eq!(tag.to_string(), "myapp:release-1");
/// ```
pub struct TagComputer {
    options: TagOptions,
    trace: Option<Box<dyn Fn(&str)>>,
}

impl std::fmt::Debug for TagComputer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagComputer")
            .field("options", &self.options)
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

impl TagComputer {
    /// Create a computer for the given options.
    pub fn new(options: TagOptions) -> Self {
        Self {
            options,
            trace: None,
        }
    }

    /// Receive a line for every notable step of a computation.
    pub fn with_trace(mut self, trace: impl Fn(&str) + 'static) -> Self {
        self.trace = Some(Box::new(trace));
        self
    }

    fn trace(&self, message: impl FnOnce() -> String) {
        if let Some(trace) = &self.trace {
            trace(&message());
        }
    }

    /// Open the repository containing `working_dir`, classifying failures
    /// the same way a computation would.
    pub fn open(working_dir: &Path) -> Result<Git, TagError> {
        Git::open(working_dir).map_err(|source| match source {
            GitError::BareRepo => TagError::WorktreeRead { source },
            source => TagError::RepositoryNotFound { source },
        })
    }

    /// Open the repository containing `working_dir` and compute its tag.
    pub fn compute_at(&self, working_dir: &Path) -> Result<QualifiedTag, TagError> {
        let git = Self::open(working_dir)?;
        self.trace(|| format!("repository root: {}", git.work_dir().display()));

        self.compute(&git)
    }

    /// Compute the tag from an already opened repository.
    pub fn compute<R>(&self, reader: &R) -> Result<QualifiedTag, TagError>
    where
        R: RepoReader + ?Sized,
    {
        let status = reader
            .status()
            .map_err(|source| TagError::StatusRead { source })?;
        let head = reader
            .head()
            .map_err(|source| TagError::HeadResolution { source })?;
        let short = head.short(Oid::SHORT_LEN).to_string();
        self.trace(|| format!("HEAD is {}", head));

        let changed = status.changed();
        let image = self.options.image.clone();

        if changed.is_empty() {
            let tags = reader
                .tags()
                .map_err(|source| TagError::TagEnumeration { source })?;

            let result = match select_tag(&tags, &head, self.options.selection) {
                Some(name) => {
                    self.trace(|| format!("clean tree, tag '{}' points at HEAD", name));
                    QualifiedTag {
                        image,
                        tag: name.to_string(),
                        head,
                        kind: TagKind::Tagged,
                        changed_paths: Vec::new(),
                    }
                }
                None => {
                    self.trace(|| "clean tree, no tag at HEAD".to_string());
                    QualifiedTag {
                        image,
                        tag: short,
                        head,
                        kind: TagKind::Commit,
                        changed_paths: Vec::new(),
                    }
                }
            };
            return Ok(result);
        }

        self.trace(|| format!("dirty tree, {} changed path(s)", changed.len()));
        let hash = dirty_hash(reader, &changed)?;

        Ok(QualifiedTag {
            image,
            tag: format!("{}-dirty-{}", short, hash),
            head,
            kind: TagKind::Dirty,
            changed_paths: changed.iter().map(|(path, _)| path.to_string()).collect(),
        })
    }
}

/// Pick the tag name to use for HEAD, if any tag points at it.
fn select_tag<'t>(tags: &'t [TagRef], head: &Oid, selection: TagSelection) -> Option<&'t str> {
    let matching = tags
        .iter()
        .filter(|t| &t.target == head)
        .map(|t| t.name.as_str());

    match selection {
        TagSelection::Lowest => matching.min(),
        TagSelection::Last => matching.last(),
    }
}
