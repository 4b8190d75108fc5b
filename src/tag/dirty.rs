//! tag::dirty
//!
//! Content hash over the changed paths of a dirty working tree.
//!
//! For each changed path, in byte-wise path order, the digest receives the
//! short-status line `"<code> <path>"` followed by the file's current bytes
//! (skipped for deleted paths). Paths enter the digest as their raw bytes.
//! The hex digest is truncated to [`DIRTY_HASH_LEN`] characters.

use std::io;

use sha2::{Digest, Sha256};

use super::TagError;
use crate::core::types::{RepoPath, StatusCode};
use crate::git::{GitError, RepoReader};

/// Number of hex characters kept from the digest.
pub const DIRTY_HASH_LEN: usize = 16;

/// Hash the given changed paths.
///
/// `changed` must already be sorted by path; [`WorktreeStatus::changed`]
/// returns it that way.
///
/// [`WorktreeStatus::changed`]: crate::git::WorktreeStatus::changed
pub fn dirty_hash<R>(reader: &R, changed: &[(&RepoPath, StatusCode)]) -> Result<String, TagError>
where
    R: RepoReader + ?Sized,
{
    let mut hasher = Sha256::new();

    for &(path, code) in changed {
        let mut line = [0u8; 4];
        hasher.update(code.as_char().encode_utf8(&mut line).as_bytes());
        hasher.update(b" ");
        hasher.update(path.as_bytes());

        if code.is_deleted() {
            continue;
        }

        let mut file = reader
            .open_file(path)
            .map_err(|source| TagError::DiffRead { source })?;
        io::copy(&mut file, &mut hasher).map_err(|source| TagError::DiffRead {
            source: GitError::Io {
                path: path.clone(),
                source,
            },
        })?;
    }

    let digest = hex::encode(hasher.finalize());
    Ok(digest[..DIRTY_HASH_LEN].to_string())
}
