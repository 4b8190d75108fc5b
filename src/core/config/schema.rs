//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$COMMITTAG_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/committag/config.toml`
//! 3. `~/.committag/config.toml`
//!
//! # Repo Config
//!
//! Located at `.git/committag/config.toml`. It lives inside the git
//! directory so that editing it never makes the working tree dirty.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., `image` must be a
//! valid image name).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::ImageName;
use crate::tag::TagSelection;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// image = "registry.example.com/team/app"
/// tag_selection = "lowest"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default image name
    pub image: Option<String>,

    /// How to choose among several tags pointing at HEAD
    pub tag_selection: Option<TagSelection>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_image(self.image.as_deref())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// image = "myapp"
/// tag_selection = "last"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Image name for builds of this repository
    pub image: Option<String>,

    /// How to choose among several tags pointing at HEAD
    pub tag_selection: Option<TagSelection>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_image(self.image.as_deref())
    }
}

fn validate_image(image: Option<&str>) -> Result<(), ConfigError> {
    if let Some(image) = image {
        ImageName::new(image)
            .map_err(|e| ConfigError::InvalidValue(format!("image: {}", e)))?;
    }
    Ok(())
}
