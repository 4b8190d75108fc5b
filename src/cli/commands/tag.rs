//! tag command - Print the image reference for the working copy

use anyhow::{anyhow, Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::core::config::Config;
use crate::core::types::ImageName;
use crate::tag::{QualifiedTag, TagComputer, TagOptions, TagSelection};
use crate::ui::output;

/// JSON shape of the tag command's output.
#[derive(Serialize)]
struct TagOutput<'a> {
    reference: String,
    #[serde(flatten)]
    tag: &'a QualifiedTag,
}

/// Compute and print the image reference.
///
/// `image` and `selection` override the configured values.
pub fn tag(
    ctx: &Context,
    image: Option<ImageName>,
    selection: Option<TagSelection>,
    json: bool,
) -> Result<()> {
    let verbosity = ctx.verbosity();
    let cwd = ctx.working_dir()?;

    let git = TagComputer::open(&cwd)?;
    output::debug(
        format!("repository root: {}", git.work_dir().display()),
        verbosity,
    );
    let config = Config::load(Some(git.git_dir())).context("loading configuration")?;
    if let Some(path) = config.repo_config_loaded_from() {
        output::debug(format!("repo config: {}", path.display()), verbosity);
    }
    if let Some(path) = config.global_config_loaded_from() {
        output::debug(format!("global config: {}", path.display()), verbosity);
    }

    let image = match image {
        Some(image) => image,
        None => {
            let configured = config.image().ok_or_else(|| {
                anyhow!("no image name given; pass --image or set `image` in the config")
            })?;
            ImageName::new(configured)?
        }
    };
    let options =
        TagOptions::new(image).with_selection(selection.unwrap_or(config.tag_selection()));

    let computer = TagComputer::new(options).with_trace(move |line| output::debug(line, verbosity));
    let tag = computer.compute(&git)?;

    if !tag.has_valid_reference_tag() {
        output::warn(
            format!(
                "tag '{}' is not a valid image reference tag; sanitize it before pushing",
                tag.tag
            ),
            verbosity,
        );
    }

    if json {
        let out = TagOutput {
            reference: tag.reference(),
            tag: &tag,
        };
        output::result(serde_json::to_string_pretty(&out)?);
    } else {
        output::result(&tag);
    }

    Ok(())
}
