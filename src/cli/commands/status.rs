//! status command - Show the changed paths that feed the dirty hash
//!
//! Paths are listed in hashing order with their short-status character,
//! so the output explains exactly what a dirty tag was computed from.

use anyhow::Result;

use crate::cli::Context;
use crate::core::types::Oid;
use crate::git::RepoReader;
use crate::tag::{TagComputer, TagError};
use crate::ui::output;

/// Print HEAD and the changed paths of the working tree.
pub fn status(ctx: &Context) -> Result<()> {
    let verbosity = ctx.verbosity();
    let git = TagComputer::open(&ctx.working_dir()?)?;

    let status = git
        .status()
        .map_err(|source| TagError::StatusRead { source })?;
    let head = git
        .head()
        .map_err(|source| TagError::HeadResolution { source })?;

    output::print(format!("HEAD {}", head.short(Oid::SHORT_LEN)), verbosity);

    let changed = status.changed();
    if changed.is_empty() {
        output::print("working tree clean", verbosity);
        return Ok(());
    }

    for (path, code) in changed {
        output::result(output::format_status_line(code, path));
    }

    Ok(())
}
