//! Property-based tests for the tag computation.
//!
//! These tests use proptest to verify invariants hold across randomly
//! generated working trees, using the in-memory repository.

use proptest::prelude::*;

use committag::core::types::{ImageName, Oid, RepoPath, StatusCode};
use committag::git::{MemoryRepo, WorktreeStatus};
use committag::tag::{is_valid_reference_tag, TagComputer, TagKind, TagOptions};

const HEAD: &str = "abcdef1234567890abcdef1234567890abcdef12";

/// Strategy for changed status codes.
fn changed_code() -> impl Strategy<Value = StatusCode> {
    prop_oneof![
        Just(StatusCode::Untracked),
        Just(StatusCode::Modified),
        Just(StatusCode::Added),
        Just(StatusCode::Deleted),
        Just(StatusCode::Renamed),
        Just(StatusCode::TypeChanged),
    ]
}

/// Strategy for a working tree: distinct paths with a code and contents.
fn worktree() -> impl Strategy<Value = Vec<(String, StatusCode, Vec<u8>)>> {
    prop::collection::btree_map(
        "[a-z]{1,6}(/[a-z0-9._-]{1,8}){0,2}",
        (changed_code(), prop::collection::vec(any::<u8>(), 0..64)),
        1..8,
    )
    .prop_map(|map| {
        map.into_iter()
            .map(|(path, (code, contents))| (path, code, contents))
            .collect()
    })
}

fn build(entries: &[(String, StatusCode, Vec<u8>)]) -> MemoryRepo {
    let mut repo = MemoryRepo::new(Oid::new(HEAD).unwrap());
    for (path, code, contents) in entries {
        repo = if code.is_deleted() {
            repo.with_status(path.as_str(), *code)
        } else {
            repo.with_file(path.as_str(), *code, contents.clone())
        };
    }
    repo
}

fn compute(repo: &MemoryRepo) -> String {
    TagComputer::new(TagOptions::new(ImageName::new("myapp").unwrap()))
        .compute(repo)
        .unwrap()
        .to_string()
}

proptest! {
    #[test]
    fn dirty_tag_is_deterministic(entries in worktree()) {
        let repo = build(&entries);
        prop_assert_eq!(compute(&repo), compute(&repo));
    }

    #[test]
    fn dirty_tag_ignores_status_order(entries in worktree(), seed in any::<u64>()) {
        let repo = build(&entries);

        // Rotate the insertion order to get a differently built map
        let mut rotated = entries.clone();
        let shift = (seed as usize) % rotated.len();
        rotated.rotate_left(shift);
        let status: WorktreeStatus = rotated
            .iter()
            .rev()
            .map(|(path, code, _)| (path.clone(), *code))
            .collect();
        let reordered = build(&entries).with_status_map(status);

        prop_assert_eq!(compute(&repo), compute(&reordered));
    }

    #[test]
    fn dirty_tag_has_expected_shape(entries in worktree()) {
        let repo = build(&entries);
        let tag = TagComputer::new(TagOptions::new(ImageName::new("myapp").unwrap()))
            .compute(&repo)
            .unwrap();

        prop_assert_eq!(tag.kind, TagKind::Dirty);
        prop_assert!(tag.tag.starts_with("abcdef1-dirty-"));
        prop_assert_eq!(tag.tag.len(), 7 + "-dirty-".len() + 16);
        prop_assert!(is_valid_reference_tag(&tag.tag));
    }

    #[test]
    fn content_edit_changes_tag(entries in worktree(), byte in any::<u8>()) {
        // Only files that are read can influence the hash
        let target = entries.iter().position(|(_, code, _)| !code.is_deleted());
        prop_assume!(target.is_some());
        let target = target.unwrap();

        let mut edited = entries.clone();
        edited[target].2.push(byte);

        prop_assert_ne!(compute(&build(&entries)), compute(&build(&edited)));
    }

    #[test]
    fn deleted_paths_are_never_opened(entries in worktree()) {
        let repo = build(&entries);
        compute(&repo);

        let opened = repo.opened_files();
        for (path, code, _) in &entries {
            prop_assert_eq!(
                opened.contains(&RepoPath::from(path.as_str())),
                !code.is_deleted()
            );
        }
    }
}
