//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Oid`] - Git object identifier (SHA)
//! - [`ImageName`] - Container image name used as the tag prefix
//! - [`StatusCode`] - Per-path change status, encoded like `git status --short`
//! - [`RepoPath`] - Repository-relative path, kept as the raw bytes git reports
//! - [`TagRef`] - A git tag short name and the commit it points at
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use committag::core::types::{ImageName, Oid, StatusCode};
//!
//! let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
//! assert_eq!(oid.short(7), "abc123d");
//!
//! let image = ImageName::new("registry.example.com/team/app").unwrap();
//! assert_eq!(image.as_str(), "registry.example.com/team/app");
//!
//! assert_eq!(StatusCode::Modified.as_char(), 'M');
//! assert!(Oid::new("not-a-sha").is_err());
//! assert!(ImageName::new("").is_err());
//! ```

use std::borrow::Borrow;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidOid(String),

    #[error("invalid image name: {0}")]
    InvalidImageName(String),

    #[error("path is not valid unicode on this platform: {0}")]
    NonUnicodePath(String),
}

/// A validated Git object identifier.
///
/// Accepts SHA-1 (40 hex chars) and SHA-256 (64 hex chars) ids and
/// normalizes them to lowercase.
///
/// # Example
///
/// ```
/// use committag::core::types::Oid;
///
/// let oid = Oid::new("ABCDEF1234567890ABCDEF1234567890ABCDEF12").unwrap();
/// assert_eq!(oid.as_str(), "abcdef1234567890abcdef1234567890abcdef12");
/// assert_eq!(oid.short(7), "abcdef1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Length of the abbreviated id used in image tags.
    pub const SHORT_LEN: usize = 7;

    /// Create a new validated object id.
    ///
    /// The OID is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a valid hex OID.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Get an abbreviated form of the OID.
    ///
    /// Returns the first `len` characters. If `len` exceeds the OID length,
    /// returns the full OID.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// Validate an object id.
    fn validate(oid: &str) -> Result<(), TypeError> {
        // SHA-1 is 40 hex chars, SHA-256 is 64
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A container image name, used verbatim as the prefix of the computed tag.
///
/// The name is opaque: it may contain a registry host, a port and path
/// components. Only the properties that would make `<name>:<tag>`
/// ambiguous are rejected:
/// - Cannot be empty
/// - Cannot contain whitespace or control characters
/// - Cannot contain `@` (digest separator)
/// - Cannot end with `:` or `/`
///
/// # Example
///
/// ```
/// use committag::core::types::ImageName;
///
/// assert!(ImageName::new("myapp").is_ok());
/// assert!(ImageName::new("localhost:5000/myapp").is_ok());
///
/// assert!(ImageName::new("").is_err());
/// assert!(ImageName::new("my app").is_err());
/// assert!(ImageName::new("myapp@sha256").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageName(String);

impl ImageName {
    /// Create a new validated image name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidImageName` if the name is empty or malformed.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidImageName(
                "image name cannot be empty".into(),
            ));
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidImageName(
                "image name cannot contain whitespace or control characters".into(),
            ));
        }
        if name.contains('@') {
            return Err(TypeError::InvalidImageName(
                "image name cannot contain '@'".into(),
            ));
        }
        if name.ends_with(':') || name.ends_with('/') {
            return Err(TypeError::InvalidImageName(format!(
                "image name cannot end with '{}'",
                &name[name.len() - 1..]
            )));
        }
        Ok(())
    }

    /// Get the image name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ImageName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl std::str::FromStr for ImageName {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<ImageName> for String {
    fn from(name: ImageName) -> Self {
        name.0
    }
}

impl std::fmt::Display for ImageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Change status of a single path.
///
/// The character encoding matches the one used by `git status --short`,
/// and is part of the dirty-hash input, so it must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    Unmodified,
    Untracked,
    Modified,
    Added,
    Deleted,
    Renamed,
    Copied,
    UpdatedButUnmerged,
    TypeChanged,
}

impl StatusCode {
    /// The short-status character for this code.
    ///
    /// # Example
    ///
    /// ```
    /// use committag::core::types::StatusCode;
    ///
    /// assert_eq!(StatusCode::Unmodified.as_char(), ' ');
    /// assert_eq!(StatusCode::Untracked.as_char(), '?');
    /// assert_eq!(StatusCode::Deleted.as_char(), 'D');
    /// ```
    pub fn as_char(self) -> char {
        match self {
            StatusCode::Unmodified => ' ',
            StatusCode::Untracked => '?',
            StatusCode::Modified => 'M',
            StatusCode::Added => 'A',
            StatusCode::Deleted => 'D',
            StatusCode::Renamed => 'R',
            StatusCode::Copied => 'C',
            StatusCode::UpdatedButUnmerged => 'U',
            StatusCode::TypeChanged => 'T',
        }
    }

    /// Whether this code marks the path as changed.
    pub fn is_changed(self) -> bool {
        self != StatusCode::Unmodified
    }

    /// Whether the path is absent from the working tree.
    pub fn is_deleted(self) -> bool {
        self == StatusCode::Deleted
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A repository-relative, `/`-separated path.
///
/// Git stores paths as bytes with no encoding, so a working tree may hold
/// names that are not UTF-8. `RepoPath` keeps those bytes exactly: they
/// are what gets hashed, compared and sorted. Text conversion is lossy and
/// only meant for display.
///
/// # Example
///
/// ```
/// use committag::core::types::RepoPath;
///
/// let path = RepoPath::from(&b"caf\xe9.txt"[..]);
/// assert_eq!(path.as_bytes(), b"caf\xe9.txt");
/// assert_eq!(path.to_string(), "caf\u{FFFD}.txt");
///
/// assert!(RepoPath::from("B") < RepoPath::from("a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoPath(Vec<u8>);

impl RepoPath {
    /// The raw path bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The path as a native relative path.
    ///
    /// Always succeeds on Unix, where any byte string is a valid path.
    /// Elsewhere the bytes must be UTF-8.
    #[cfg(unix)]
    pub fn to_path(&self) -> Result<PathBuf, TypeError> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        Ok(PathBuf::from(OsStr::from_bytes(&self.0)))
    }

    /// The path as a native relative path.
    ///
    /// Always succeeds on Unix, where any byte string is a valid path.
    /// Elsewhere the bytes must be UTF-8.
    #[cfg(not(unix))]
    pub fn to_path(&self) -> Result<PathBuf, TypeError> {
        std::str::from_utf8(&self.0)
            .map(PathBuf::from)
            .map_err(|_| TypeError::NonUnicodePath(self.to_string()))
    }
}

impl From<&str> for RepoPath {
    fn from(path: &str) -> Self {
        Self(path.as_bytes().to_vec())
    }
}

impl From<String> for RepoPath {
    fn from(path: String) -> Self {
        Self(path.into_bytes())
    }
}

impl From<&[u8]> for RepoPath {
    fn from(path: &[u8]) -> Self {
        Self(path.to_vec())
    }
}

impl From<Vec<u8>> for RepoPath {
    fn from(path: Vec<u8>) -> Self {
        Self(path)
    }
}

impl AsRef<[u8]> for RepoPath {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for RepoPath {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<str> for RepoPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for RepoPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// A git tag, reduced to its short name and the commit it points at.
///
/// Annotated tags are peeled, so `target` is always a commit id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagRef {
    /// Short name (`v1.2.3`, not `refs/tags/v1.2.3`)
    pub name: String,
    /// The commit the tag resolves to
    pub target: Oid,
}

impl TagRef {
    /// Create a tag ref from a short name and its target.
    pub fn new(name: impl Into<String>, target: Oid) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}
