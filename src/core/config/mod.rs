//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! committag has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$COMMITTAG_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/committag/config.toml`
//! 3. `~/.committag/config.toml`
//!
//! # Repo Config Location
//!
//! `<git-dir>/committag/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use committag::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//!
//! if let Some(image) = config.image() {
//!     println!("Image: {}", image);
//! }
//! println!("Tag selection: {:?}", config.tag_selection());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::tag::TagSelection;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "COMMITTAG_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules: repo config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `git_dir` is provided, also loads the repo-specific config stored
    /// under it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(git_dir: Option<&Path>) -> Result<Config, ConfigError> {
        let (global, global_path) = Self::load_global()?;

        let (repo, repo_path) = match git_dir {
            Some(dir) => Self::load_repo(dir)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(Config {
            global,
            repo,
            global_path,
            repo_path,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        for path in Self::global_candidates() {
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    /// Global config locations, in search order.
    fn global_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("committag/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".committag/config.toml"));
        }
        candidates
    }

    fn load_repo(git_dir: &Path) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::repo_config_path(git_dir);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = Self::read_config(&path)?;
        Ok((Some(config), Some(path)))
    }

    /// Read and parse a config file.
    fn read_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path for repo config under the given git directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("committag/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the configured image name.
    ///
    /// Returns `None` if neither scope sets one.
    pub fn image(&self) -> Option<&str> {
        self.repo
            .as_ref()
            .and_then(|r| r.image.as_deref())
            .or(self.global.image.as_deref())
    }

    /// Get the tag selection policy.
    ///
    /// Defaults to [`TagSelection::Lowest`] if not configured.
    pub fn tag_selection(&self) -> TagSelection {
        self.repo
            .as_ref()
            .and_then(|r| r.tag_selection)
            .or(self.global.tag_selection)
            .unwrap_or_default()
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_repo_config(git_dir: &Path, contents: &str) {
        let path = Config::repo_config_path(git_dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn defaults_without_repo() {
        let config = Config::default();
        assert!(config.image().is_none());
        assert_eq!(config.tag_selection(), TagSelection::Lowest);
    }

    #[test]
    fn load_repo_config() {
        let temp = TempDir::new().unwrap();
        write_repo_config(
            temp.path(),
            r#"
            image = "myapp"
            tag_selection = "last"
            "#,
        );

        let (repo, path) = Config::load_repo(temp.path()).unwrap();
        let repo = repo.unwrap();

        assert_eq!(repo.image.as_deref(), Some("myapp"));
        assert_eq!(repo.tag_selection, Some(TagSelection::Last));
        assert_eq!(path, Some(Config::repo_config_path(temp.path())));
    }

    #[test]
    fn missing_repo_config_is_none() {
        let temp = TempDir::new().unwrap();
        let (repo, path) = Config::load_repo(temp.path()).unwrap();
        assert!(repo.is_none());
        assert!(path.is_none());
    }

    #[test]
    fn load_global_from_env() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "image = \"global/app\"\n").unwrap();

        std::env::set_var(CONFIG_ENV, config_path.to_str().unwrap());
        let result = Config::load(None);
        std::env::remove_var(CONFIG_ENV);

        let config = result.unwrap();
        assert_eq!(config.image(), Some("global/app"));
        assert_eq!(config.global_config_loaded_from(), Some(config_path.as_path()));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        write_repo_config(
            temp.path(),
            r#"
            image = "myapp"
            unknown_field = true
            "#,
        );

        let result = Config::load_repo(temp.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn precedence_repo_overrides_global() {
        let config = Config {
            global: GlobalConfig {
                image: Some("global/app".to_string()),
                tag_selection: Some(TagSelection::Last),
            },
            repo: Some(RepoConfig {
                image: Some("repo/app".to_string()),
                ..Default::default()
            }),
            global_path: None,
            repo_path: None,
        };

        assert_eq!(config.image(), Some("repo/app"));
        // Not set in repo scope, falls through to global
        assert_eq!(config.tag_selection(), TagSelection::Last);
    }
}
