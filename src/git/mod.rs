//! git
//!
//! Single interface for all Git reads.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. Repository reads flow
//! through [`Git`]; no other module imports `git2`. The tag computer does
//! not depend on `Git` directly but on the narrow [`RepoReader`] trait,
//! which [`MemoryRepo`] also implements for tests.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - HEAD resolution
//! - Per-path worktree status
//! - Tag enumeration
//! - Working-tree file access
//!
//! # Example
//!
//! ```ignore
//! use committag::git::{Git, RepoReader};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let head = git.head()?;
//! let dirty = !git.status()?.is_clean();
//! ```

mod interface;
pub mod mock;
mod traits;

pub use interface::{Git, GitError, WorktreeStatus};
pub use mock::MemoryRepo;
pub use traits::RepoReader;
