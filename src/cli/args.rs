//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::ImageName;
use crate::tag::TagSelection;

/// committag - Deterministic container image tags from git state
#[derive(Parser, Debug)]
#[command(name = "committag")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if committag was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; only results and errors are printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the image reference for the current working copy
    #[command(
        name = "tag",
        long_about = "Print the image reference for the current working copy.\n\n\
            A clean tree is tagged with the git tag pointing at HEAD, or with the \
            7-character commit hash when there is none. A dirty tree is tagged \
            <hash>-dirty-<content-hash>, where the content hash changes whenever \
            a changed file's contents or status change.",
        after_help = "\
EXAMPLES:
    # Tag for a build of myapp
    committag tag --image myapp

    # Use the image configured in .git/committag/config.toml
    committag tag

    # Machine-readable output
    committag tag --image myapp --json"
    )]
    Tag {
        /// Image name (overrides config)
        #[arg(short, long)]
        image: Option<ImageName>,

        /// How to choose among several tags pointing at HEAD
        #[arg(long, value_enum)]
        tag_selection: Option<SelectionArg>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the changed paths that feed the dirty hash
    Status,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Tag selection policy as a CLI value.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionArg {
    /// Smallest tag name wins
    Lowest,
    /// Last tag enumerated wins
    Last,
}

impl From<SelectionArg> for TagSelection {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Lowest => TagSelection::Lowest,
            SelectionArg::Last => TagSelection::Last,
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
