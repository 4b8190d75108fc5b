//! committag - deterministic container image tags from git state
//!
//! committag computes an image reference `<image>:<tag>` from the state of
//! a git working copy. Builds of the same clean commit share a tag; builds
//! of a dirty working copy get a tag that changes if and only if the
//! changed files' contents or statuses change.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to tag)
//! - [`tag`] - The tag computation and its error taxonomy
//! - [`git`] - Single interface for all Git reads, plus an in-memory fake
//! - [`core`] - Domain types and configuration
//! - [`ui`] - Output and verbosity handling
//!
//! # Invariants
//!
//! 1. The tag depends only on HEAD, cleanliness, and for dirty trees the
//!    sorted changed paths, their status codes and their contents
//! 2. Nothing is cached between calls; every call reads a fresh snapshot
//! 3. The repository is never written to

pub mod cli;
pub mod core;
pub mod git;
pub mod tag;
pub mod ui;
