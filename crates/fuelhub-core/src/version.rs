//! Client version numbers and VCS revision references
//!
//! Clients address a resource by a linear version number (1, 2, 3, ... or
//! `tip`). The repository store addresses history by revision references
//! relative to the trunk tip or by tag name.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Sentinel accepted for "most recent version"
pub const TIP: &str = "tip";

/// Reference to a point in a repository's trunk history
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Revision {
    /// Most recent commit on trunk
    Tip,
    /// `n` commits behind the trunk tip (`HEAD~n`)
    Behind(u32),
    /// A tag name, such as a resource's genesis tag
    Tag(String),
}

impl Revision {
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tip => write!(f, "{}", TIP),
            Self::Behind(n) => write!(f, "HEAD~{}", n),
            Self::Tag(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for Revision {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == TIP {
            return Ok(Self::Tip);
        }
        if let Some(n) = s.strip_prefix("HEAD~") {
            let n = n.parse::<u32>().map_err(|e| {
                CoreError::invalid_value("revision", format!("'{}': {}", s, e))
            })?;
            return Ok(Self::Behind(n));
        }
        if s == "HEAD" {
            return Ok(Self::Behind(0));
        }
        Ok(Self::Tag(s.to_string()))
    }
}

/// Client-supplied version: the tip sentinel or a positive number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSpec {
    Tip,
    Number(u32),
}

impl VersionSpec {
    /// Parse a client version string.
    ///
    /// `""` and `"tip"` denote the tip. Anything else must parse as a
    /// positive integer.
    pub fn parse(version: &str) -> Result<Self, CoreError> {
        if version.is_empty() || version == TIP {
            return Ok(Self::Tip);
        }
        let parsed = version.parse::<i64>().map_err(|e| {
            CoreError::invalid_value("version", format!("'{}': {}", version, e))
        })?;
        if parsed <= 0 {
            return Err(CoreError::invalid_value(
                "version",
                format!("Invalid version: {}", version),
            ));
        }
        let number = u32::try_from(parsed).map_err(|_| {
            CoreError::invalid_value("version", format!("'{}' is out of range", version))
        })?;
        Ok(Self::Number(number))
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tip => write!(f, "{}", TIP),
            Self::Number(v) => write!(f, "{}", v),
        }
    }
}
