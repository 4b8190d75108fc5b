//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves its inputs from flags and config
//! 2. Calls into [`crate::tag`] or [`crate::git`]
//! 3. Formats and displays output
//!
//! Handlers are read-only; nothing here writes to the repository.

mod completion;
mod status;
mod tag;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use status::status;
pub use tag::tag;

use anyhow::Result;

use super::args::Command;
use super::Context;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Tag {
            image,
            tag_selection,
            json,
        } => tag::tag(ctx, image, tag_selection.map(Into::into), json),
        Command::Status => status::status(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}
